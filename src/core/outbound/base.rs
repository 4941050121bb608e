use crate::core::types::Record;

/// Downstream end of the transform chain.
///
/// Shared by all workers, so implementations synchronise internally.
pub trait RecordSender: Send + Sync {
    fn send(&self, record: Record) -> super::Result<()>;

    fn flush(&self) -> super::Result<()> {
        Ok(())
    }
}
