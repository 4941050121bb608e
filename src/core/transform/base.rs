use crate::core::types::Record;

/// A per-record transformation step.
///
/// Implementations hold only parameters validated at construction and keep no
/// state between calls, so one instance is shared by every worker.
pub trait Transform: Send + Sync {
    fn name(&self) -> &str;

    /// Mutates `record` in place. An error leaves the record dirty and it is
    /// not forwarded to the writer.
    fn evaluate(&self, record: &mut Record) -> super::Result<()>;
}
