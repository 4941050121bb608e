//! Job-wide record counters shared by all workers.

mod summary;

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use log::warn;

pub use summary::JobSummary;

use super::transform::DirtyRecord;

/// A point-in-time view of the read and error counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorMetrics {
    pub read: u64,
    pub error: u64,
}

impl ErrorMetrics {
    pub fn new(read: u64, error: u64) -> Self {
        Self { read, error }
    }

    /// `error / read`, or `None` before anything was read.
    pub fn error_ratio(&self) -> Option<f64> {
        if self.read == 0 {
            return None;
        }
        Some(self.error as f64 / self.read as f64)
    }
}

pub trait MetricsSource: Send + Sync {
    fn total_read_records(&self) -> u64;
    fn total_error_records(&self) -> u64;

    /// Reads the error counter before the read counter. Writers bump the read
    /// counter first, so the snapshot always has `error <= read`.
    fn snapshot(&self) -> ErrorMetrics {
        let error = self.total_error_records();
        let read = self.total_read_records();
        ErrorMetrics { read, error }
    }
}

/// Counters for one job run, plus a bounded sample of dirty-record causes.
#[derive(Debug)]
pub struct JobStats {
    read: AtomicU64,
    written: AtomicU64,
    error: AtomicU64,
    dirty_by_transform: DashMap<String, AtomicU64>,
    samples: spin::Mutex<Vec<String>>,
    sample_size: usize,
}

impl JobStats {
    pub fn new(sample_size: usize) -> Self {
        Self {
            read: AtomicU64::new(0),
            written: AtomicU64::new(0),
            error: AtomicU64::new(0),
            dirty_by_transform: DashMap::new(),
            samples: spin::Mutex::new(Vec::with_capacity(sample_size)),
            sample_size,
        }
    }

    pub fn record_read(&self) {
        self.read.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dirty(&self, dirty: &DirtyRecord) {
        self.error.fetch_add(1, Ordering::SeqCst);
        self.dirty_by_transform
            .entry(dirty.transform.clone())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);

        let sample = {
            let mut samples = self.samples.lock();
            if samples.len() < self.sample_size {
                let sample = format!("{}: {}", dirty.record, dirty.error);
                samples.push(sample.clone());
                Some(sample)
            } else {
                None
            }
        };

        if let Some(sample) = sample {
            warn!("Dirty record {}", sample);
        }
    }

    pub fn total_written_records(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> JobSummary {
        let metrics = self.snapshot();

        let mut dirty_by_transform = self
            .dirty_by_transform
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().load(Ordering::Relaxed)))
            .collect::<Vec<_>>();
        dirty_by_transform.sort();

        JobSummary {
            read: metrics.read,
            written: self.total_written_records(),
            dirty: metrics.error,
            dirty_by_transform,
            samples: self.samples.lock().clone(),
        }
    }
}

impl MetricsSource for JobStats {
    fn total_read_records(&self) -> u64 {
        self.read.load(Ordering::SeqCst)
    }

    fn total_error_records(&self) -> u64 {
        self.error.load(Ordering::SeqCst)
    }
}
