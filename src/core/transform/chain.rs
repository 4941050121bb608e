use log::debug;

use crate::core::{
    loader::{isolated, LoaderContext},
    outbound::RecordSender,
    stats::JobStats,
    types::Record,
};

use super::{Error, Transform};

/// A record that failed a transform, with the transform that rejected it.
#[derive(Debug)]
pub struct DirtyRecord {
    pub transform: String,
    pub error: Error,
    pub record: Record,
}

struct Stage {
    transform: Box<dyn Transform>,
    context: Option<LoaderContext>,
}

/// Ordered transforms applied to each record.
///
/// A stage with a loader context runs with that context installed on the
/// calling thread.
#[derive(Default)]
pub struct TransformChain {
    stages: Vec<Stage>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, transform: Box<dyn Transform>) -> Self {
        self.stages.push(Stage {
            transform,
            context: None,
        });
        self
    }

    pub fn push_isolated(mut self, transform: Box<dyn Transform>, context: LoaderContext) -> Self {
        self.stages.push(Stage {
            transform,
            context: Some(context),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.transform.name()).collect()
    }

    /// Runs every stage in order and stops at the first failure.
    pub fn apply(&self, mut record: Record) -> Result<Record, DirtyRecord> {
        for stage in &self.stages {
            let result = match &stage.context {
                Some(ctx) => isolated(ctx, || stage.transform.evaluate(&mut record)),
                None => stage.transform.evaluate(&mut record),
            };

            if let Err(error) = result {
                return Err(DirtyRecord {
                    transform: stage.transform.name().to_string(),
                    error,
                    record,
                });
            }
        }

        Ok(record)
    }

    /// Applies the chain and routes the outcome: clean records go to `sender`,
    /// dirty ones are reported to `stats`.
    ///
    /// Returns `Ok(false)` for a dirty record. Fatal transform errors and send
    /// failures are returned as errors.
    pub fn process<S>(&self, record: Record, sender: &S, stats: &JobStats) -> super::Result<bool>
    where
        S: RecordSender + ?Sized,
    {
        match self.apply(record) {
            Ok(record) => {
                sender.send(record)?;
                stats.record_written();
                Ok(true)
            }
            Err(dirty) if dirty.error.is_fatal() => Err(dirty.error),
            Err(dirty) => {
                debug!("{} rejected {}", dirty.transform, dirty.record);
                stats.record_dirty(&dirty);
                Ok(false)
            }
        }
    }
}
