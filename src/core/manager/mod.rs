pub mod error;
mod worker;

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    core::{
        inbound::{self, StdioInbound},
        loader::{isolated, LoaderContext, LoaderRegistry, PluginKind},
        monitor::ErrorThresholdMonitor,
        outbound::{self, RecordSender},
        stats::{JobStats, JobSummary, MetricsSource},
        transform::{self, TransformChain},
        types::Record,
    },
    timeit,
};

pub use error::{Error, Result};
use worker::Worker;

pub struct Manager {
    inbound: StdioInbound,
    sender: Arc<dyn RecordSender>,
    chain: Arc<TransformChain>,
    monitor: ErrorThresholdMonitor,
    stats: Arc<JobStats>,
    reader_context: LoaderContext,
    writer_context: LoaderContext,
    // keeps the plugin contexts alive for the whole job
    registry: LoaderRegistry,
    worker_threads: usize,
    check_interval: usize,
    channel_buffer_size: usize,
}

pub fn try_create_from_config(cfg: Config) -> Result<Manager> {
    let sender = outbound::try_create_from(cfg.outbound.clone())?;
    try_create_with_sender(cfg, sender)
}

pub fn try_create_with_sender(cfg: Config, sender: Arc<dyn RecordSender>) -> Result<Manager> {
    info!("Creating manager from config...");

    let registry = LoaderRegistry::new();

    let chain = timeit! { "Creating transform chain", {
        transform::try_create_chain(&cfg.transforms, &registry)?
    }};
    info!("Transform chain: {:?}", chain.names());

    let monitor = ErrorThresholdMonitor::try_create_from(&cfg.error_limit)?;
    let policy = monitor.policy();
    info!(
        "Dirty record limit: {:?}, percentage limit: {:?}",
        policy.record_limit(),
        policy.percentage_limit()
    );

    let reader_context = registry.get_or_create(PluginKind::Reader, "stdio");
    let writer_context = registry.get_or_create(PluginKind::Writer, cfg.outbound.name());

    Ok(Manager {
        inbound: inbound::try_create_from(cfg.inbound)?,
        sender,
        chain: Arc::new(chain),
        monitor,
        stats: Arc::new(JobStats::new(cfg.global.dirty_sample_size)),
        reader_context,
        writer_context,
        registry,
        worker_threads: cfg.global.worker_threads,
        check_interval: cfg.global.check_interval,
        channel_buffer_size: cfg.global.channel_buffer_size,
    })
}

impl Manager {
    /// Streams `input` through the workers and returns the job summary.
    ///
    /// Lines are parsed as they arrive and handed round-robin to one bounded
    /// channel per worker. The first worker failure cancels `ctx`, which also
    /// stops the reader. Once the input is exhausted and all workers are done
    /// both dirty-data limits are checked.
    pub async fn run<R>(&self, input: R, ctx: CancellationToken) -> Result<JobSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        info!(
            "Starting {} workers over {} loader contexts",
            self.worker_threads,
            self.registry.len()
        );

        let mut senders = Vec::with_capacity(self.worker_threads);
        let mut workers = JoinSet::new();
        for id in 0..self.worker_threads {
            let (tx, rx) = mpsc::channel(self.channel_buffer_size);
            senders.push(tx);

            let worker = self.worker(id);
            let ctx = ctx.clone();
            workers.spawn_blocking(move || worker.run(rx, ctx));
        }

        let mut failure = match self.dispatch(input, senders, &ctx).await {
            Ok(_) => None,
            Err(err) => {
                ctx.cancel();
                Some(err)
            }
        };

        while let Some(joined) = workers.join_next().await {
            let err = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(err)) => err,
                Err(join_err) => {
                    ctx.cancel();
                    Error::WorkerPanicked(join_err.to_string())
                }
            };

            failure = match failure {
                None | Some(Error::Cancelled) => Some(err),
                Some(first) => Some(first),
            };
        }

        if failure.is_none() && ctx.is_cancelled() {
            failure = Some(Error::Cancelled);
        }

        if let Some(err) = failure {
            warn!("Job failed, {}", self.stats.summary());
            return Err(err);
        }

        self.sender.flush()?;

        let metrics = self.stats.snapshot();
        self.monitor.check_record_limit(&metrics)?;
        self.monitor.check_percentage_limit(&metrics)?;

        Ok(self.stats.summary())
    }

    /// Reads `input` line by line and deals the records round-robin to
    /// `senders`. Stops at EOF, on cancellation, or once a worker has gone.
    /// Returns how many records were handed out.
    async fn dispatch<R>(
        &self,
        input: R,
        senders: Vec<mpsc::Sender<Record>>,
        ctx: &CancellationToken,
    ) -> Result<u64>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut dispatched = 0u64;

        loop {
            let line = tokio::select! {
                biased;
                _ = ctx.cancelled() => break,
                line = self.inbound.next_line(&mut lines) => line?,
            };

            let Some(line) = line else {
                break;
            };

            let record = isolated(&self.reader_context, || self.inbound.parse_line(&line));
            let tx = &senders[(dispatched % senders.len() as u64) as usize];

            tokio::select! {
                biased;
                _ = ctx.cancelled() => break,
                sent = tx.send(record) => if sent.is_err() {
                    debug!("Worker channel closed, stop reading");
                    break;
                }
            }

            dispatched += 1;
        }

        info!("Read {} records", dispatched);
        Ok(dispatched)
    }

    fn worker(&self, id: usize) -> Worker {
        Worker {
            id,
            chain: self.chain.clone(),
            sender: self.sender.clone(),
            stats: self.stats.clone(),
            monitor: self.monitor,
            context: self.writer_context.clone(),
            check_interval: self.check_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, time::Duration};

    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;
    use crate::{
        config::{global::GlobalConfig, transform::TransformConfig, ErrorLimitConfig},
        core::{monitor, outbound::MemorySender, types::Column},
    };

    fn config(record: Option<i64>, percentage: Option<f64>) -> Config {
        Config {
            global: GlobalConfig {
                worker_threads: 3,
                check_interval: 1,
                dirty_sample_size: 4,
                channel_buffer_size: 8,
            },
            error_limit: ErrorLimitConfig { record, percentage },
            transforms: vec![TransformConfig {
                name: "dx_replace".into(),
                parameters: vec![0.into(), "3".into(), "10".into(), "***".into()],
                plugin: Some("mask".into()),
                disabled: false,
            }],
            ..Default::default()
        }
    }

    /// `clean` lines long enough for the transform and `dirty` ones too short.
    fn input(clean: usize, dirty: usize) -> Cursor<Vec<u8>> {
        let mut text = String::new();
        for i in 0..clean {
            text.push_str(&format!("abcd{},x\n", i));
        }
        for _ in 0..dirty {
            text.push_str("ab,\\N\n");
        }
        Cursor::new(text.into_bytes())
    }

    fn manager(cfg: Config) -> (Manager, Arc<MemorySender>) {
        let sender = Arc::new(MemorySender::new());
        let mgr = try_create_with_sender(cfg, sender.clone()).unwrap();
        (mgr, sender)
    }

    async fn wait_for_written(sender: &MemorySender, n: usize) -> usize {
        for _ in 0..200 {
            if sender.len() >= n {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        sender.len()
    }

    #[tokio::test]
    async fn test_run_clean_job() {
        let (mgr, sender) = manager(config(Some(0), None));

        let summary = mgr
            .run(input(10, 0), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.read, 10);
        assert_eq!(summary.written, 10);
        assert_eq!(summary.dirty, 0);

        let written = sender.take();
        assert_eq!(written.len(), 10);
        assert!(written
            .iter()
            .all(|r| r.get(0).unwrap() == &Column::from("abc***")));
    }

    #[tokio::test]
    async fn test_dirty_records_within_limit() {
        let (mgr, sender) = manager(config(Some(5), None));

        let summary = mgr
            .run(input(20, 5), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.read, 25);
        assert_eq!(summary.dirty, 5);
        assert_eq!(summary.dirty_by_transform, vec![("dx_replace".to_string(), 5)]);
        assert_eq!(summary.samples.len(), 4);
        assert_eq!(sender.take().len(), 20);
    }

    #[tokio::test]
    async fn test_null_literal_becomes_null_column() {
        let (mgr, sender) = manager(config(None, None));

        mgr.run(input(1, 0), CancellationToken::new()).await.unwrap();
        mgr.run(Cursor::new(b"abcd,\\N\n".to_vec()), CancellationToken::new())
            .await
            .unwrap();

        let written = sender.take();
        assert_eq!(written[1].get(1).unwrap(), &Column::Null);
    }

    #[tokio::test]
    async fn test_record_limit_exceeded() {
        let (mgr, _) = manager(config(Some(2), None));
        let ctx = CancellationToken::new();

        let err = mgr.run(input(5, 10), ctx.clone()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Monitor(monitor::Error::DirtyDataLimitExceeded(
                monitor::Breach::Records { limit: 2, .. }
            ))
        ));
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_percentage_limit_checked_at_end() {
        let (mgr, _) = manager(config(None, Some(0.1)));
        let err = mgr
            .run(input(89, 11), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Monitor(monitor::Error::DirtyDataLimitExceeded(
                monitor::Breach::Percentage { .. }
            ))
        ));

        let (mgr, _) = manager(config(None, Some(0.1)));
        let summary = mgr
            .run(input(90, 10), CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(summary.dirty, 10);
    }

    #[tokio::test]
    async fn test_cancelled_job() {
        let (mgr, sender) = manager(config(None, None));
        let ctx = CancellationToken::new();
        ctx.cancel();

        let err = mgr.run(input(3, 0), ctx).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(sender.take().is_empty());
    }

    #[tokio::test]
    async fn test_records_written_before_input_ends() {
        let (mgr, sender) = manager(config(None, None));
        let (mut client, server) = tokio::io::duplex(256);

        let job = mgr.run(BufReader::new(server), CancellationToken::new());
        let feed = async {
            client.write_all(b"abcd1\nabcd2\n").await.unwrap();
            let written = wait_for_written(&sender, 2).await;
            drop(client);
            written
        };

        let (summary, written_while_open) = tokio::join!(job, feed);
        assert_eq!(written_while_open, 2);
        assert_eq!(summary.unwrap().written, 2);
    }

    #[tokio::test]
    async fn test_cancel_while_waiting_for_input() {
        let (mgr, _) = manager(config(None, None));
        let (_client, server) = tokio::io::duplex(256);
        let ctx = CancellationToken::new();

        let job = mgr.run(BufReader::new(server), ctx.clone());
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            ctx.cancel();
        };

        let (result, _) = tokio::time::timeout(Duration::from_secs(5), async {
            tokio::join!(job, cancel)
        })
        .await
        .unwrap();
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn test_record_limit_fails_on_open_input() {
        let (mgr, _) = manager(config(Some(2), None));
        let (mut client, server) = tokio::io::duplex(256);
        client.write_all(b"ab\nab\nab\nab\nab\n").await.unwrap();

        let err = tokio::time::timeout(
            Duration::from_secs(5),
            mgr.run(BufReader::new(server), CancellationToken::new()),
        )
        .await
        .unwrap()
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Monitor(monitor::Error::DirtyDataLimitExceeded(_))
        ));
        drop(client);
    }

    #[test]
    fn test_illegal_parameters_fail_setup() {
        let mut cfg = config(None, None);
        cfg.transforms[0].parameters = vec![0.into(), "3".into()];

        let err = try_create_with_sender(cfg, Arc::new(MemorySender::new()))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::Transform(transform::Error::IllegalParameter { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_from_file() {
        use std::io::Write;

        let (mgr, sender) = manager(config(None, None));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "abcde,b\n\nabcdf,c").unwrap();

        let input = inbound::open(Some(file.path())).await.unwrap();
        let summary = mgr.run(input, CancellationToken::new()).await.unwrap();

        assert_eq!(summary.read, 2);
        assert_eq!(sender.take().len(), 2);
    }
}
