use serde::{Deserialize, Serialize};

use crate::config::Verify;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StdioInboundConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_null_literal")]
    pub null_literal: String,
}

impl Default for StdioInboundConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            null_literal: default_null_literal(),
        }
    }
}

impl Verify for StdioInboundConfig {
    fn verify(&mut self) -> super::Result<()> {
        if self.null_literal.is_empty() {
            return Err(super::super::Error::EmptyField("inbound", "null_literal"));
        }

        if self.null_literal.contains(self.delimiter) {
            return Err(super::super::Error::InvalidConfig(format!(
                "inbound null_literal {:?} contains the delimiter {:?}",
                self.null_literal, self.delimiter
            )));
        }

        Ok(())
    }
}

pub(crate) fn default_delimiter() -> char {
    ','
}

pub(crate) fn default_null_literal() -> String {
    "\\N".to_string()
}
