pub mod stdio;

use serde::{Deserialize, Serialize};

pub use super::Result;
use super::Verify;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundConfig {
    #[serde(rename = "stdio")]
    Stdio(stdio::StdioInboundConfig),
}

impl Default for InboundConfig {
    fn default() -> Self {
        InboundConfig::Stdio(stdio::StdioInboundConfig::default())
    }
}

impl Verify for InboundConfig {
    fn verify(&mut self) -> Result<()> {
        match self {
            InboundConfig::Stdio(cfg) => cfg.verify(),
        }
    }
}
