use std::sync::Arc;

use log::{debug, error};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{
    loader::{LoaderContext, LoaderScope},
    monitor::ErrorThresholdMonitor,
    outbound::RecordSender,
    stats::{JobStats, MetricsSource},
    transform::TransformChain,
    types::Record,
};

/// Drains one record channel through the chain on a blocking thread.
pub(super) struct Worker {
    pub id: usize,
    pub chain: Arc<TransformChain>,
    pub sender: Arc<dyn RecordSender>,
    pub stats: Arc<JobStats>,
    pub monitor: ErrorThresholdMonitor,
    pub context: LoaderContext,
    pub check_interval: usize,
}

impl Worker {
    /// Runs until the channel is closed and drained, the token is cancelled or
    /// a record fails the job.
    pub fn run(self, rx: mpsc::Receiver<Record>, ctx: CancellationToken) -> super::Result<()> {
        let result = {
            let _scope = LoaderScope::enter(self.context.clone());
            self.process(rx, &ctx)
        };

        if let Err(ref err) = result {
            if !matches!(err, super::Error::Cancelled) {
                error!("Worker {} failed: {}", self.id, err);
                ctx.cancel();
            }
        }

        result
    }

    fn process(&self, mut rx: mpsc::Receiver<Record>, ctx: &CancellationToken) -> super::Result<()> {
        let mut processed = 0usize;

        while let Some(record) = rx.blocking_recv() {
            if ctx.is_cancelled() {
                debug!("Worker {} cancelled after {} records", self.id, processed);
                return Err(super::Error::Cancelled);
            }

            self.stats.record_read();
            self.chain
                .process(record, self.sender.as_ref(), &self.stats)?;

            processed += 1;
            if processed % self.check_interval == 0 {
                self.monitor.check_record_limit(&self.stats.snapshot())?;
            }
        }

        debug!("Worker {} finished {} records", self.id, processed);
        Ok(())
    }
}
