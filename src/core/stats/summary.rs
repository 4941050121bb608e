use std::fmt::Display;

use serde::Serialize;

/// End-of-job totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobSummary {
    pub read: u64,
    pub written: u64,
    pub dirty: u64,
    pub dirty_by_transform: Vec<(String, u64)>,
    pub samples: Vec<String>,
}

impl Display for JobSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "read {} records, wrote {}, {} dirty",
            self.read, self.written, self.dirty
        )?;
        for (transform, count) in &self.dirty_by_transform {
            writeln!(f, "  - {}: {} dirty", transform, count)?;
        }
        for sample in &self.samples {
            writeln!(f, "  > {}", sample)?;
        }
        Ok(())
    }
}
