mod base;
mod error;
#[cfg(test)]
mod memory;
pub mod stdio;

pub use base::RecordSender;
pub use error::{Error, Result};
#[cfg(test)]
pub use memory::MemorySender;

use std::sync::Arc;

use crate::config::OutboundConfig;

pub fn try_create_from(cfg: OutboundConfig) -> Result<Arc<dyn RecordSender>> {
    let sender: Arc<dyn RecordSender> = match cfg {
        OutboundConfig::Stdio(cfg) => Arc::new(stdio::StdioOutbound::try_create_from(cfg)?),
    };

    Ok(sender)
}
