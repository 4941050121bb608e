use serde::{Deserialize, Serialize};

use crate::config::inbound::stdio::{default_delimiter, default_null_literal};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Io {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StdioOutboundConfig {
    #[serde(default = "default_io")]
    pub io: Io,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_null_literal")]
    pub null_literal: String,
}

impl Default for StdioOutboundConfig {
    fn default() -> Self {
        Self {
            io: default_io(),
            delimiter: default_delimiter(),
            null_literal: default_null_literal(),
        }
    }
}

fn default_io() -> Io {
    Io::Stdout
}
