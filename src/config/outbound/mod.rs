use serde::{Deserialize, Serialize};

use super::Verify;

pub mod stdio;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "type")]
pub enum OutboundConfig {
    #[serde(rename = "stdio")]
    Stdio(stdio::StdioOutboundConfig),
}

impl Default for OutboundConfig {
    fn default() -> Self {
        OutboundConfig::Stdio(stdio::StdioOutboundConfig::default())
    }
}

impl OutboundConfig {
    /// Plugin name the writer's loader context is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundConfig::Stdio(_) => "stdio",
        }
    }
}

impl Verify for OutboundConfig {
    fn verify(&mut self) -> super::Result<()> {
        Ok(())
    }
}
