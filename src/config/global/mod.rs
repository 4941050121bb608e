use log::warn;
use serde::{Deserialize, Serialize};

use super::Verify;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    /// Records a worker processes between two record-limit checks.
    #[serde(default = "default_check_interval")]
    pub check_interval: usize,
    #[serde(default = "default_dirty_sample_size")]
    pub dirty_sample_size: usize,
    /// Capacity of each reader to worker channel.
    #[serde(default = "default_channel_buffer_size")]
    pub channel_buffer_size: usize,
}

fn default_worker_threads() -> usize {
    num_cpus::get()
}

fn default_check_interval() -> usize {
    1000
}

fn default_dirty_sample_size() -> usize {
    16
}

fn default_channel_buffer_size() -> usize {
    128
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            check_interval: default_check_interval(),
            dirty_sample_size: default_dirty_sample_size(),
            channel_buffer_size: default_channel_buffer_size(),
        }
    }
}

impl Verify for GlobalConfig {
    fn verify(&mut self) -> super::Result<()> {
        if self.worker_threads == 0 {
            return Err(super::Error::InvalidConfig(
                "worker_threads must be at least 1".into(),
            ));
        }

        if self.check_interval == 0 {
            return Err(super::Error::InvalidConfig(
                "check_interval must be at least 1".into(),
            ));
        }

        if self.channel_buffer_size == 0 {
            return Err(super::Error::InvalidConfig(
                "channel_buffer_size must be at least 1".into(),
            ));
        }

        warn!("Global Settings: ");
        warn!("  - worker_threads: {}", self.worker_threads);
        warn!("  - check_interval: {}", self.check_interval);
        warn!("  - dirty_sample_size: {}", self.dirty_sample_size);
        warn!("  - channel_buffer_size: {}", self.channel_buffer_size);

        Ok(())
    }
}
