use crate::core::types::Record;

use super::base::RecordSender;

/// Collects sent records in memory.
#[derive(Debug, Default)]
pub struct MemorySender {
    records: spin::Mutex<Vec<Record>>,
}

impl MemorySender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl RecordSender for MemorySender {
    fn send(&self, record: Record) -> super::Result<()> {
        self.records.lock().push(record);
        Ok(())
    }
}
