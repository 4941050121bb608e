use serde::{Deserialize, Serialize};

use crate::core::monitor::{LimitSource, ThresholdPolicy};

use super::Verify;

/// `[error_limit]` section. `record` takes precedence over `percentage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorLimitConfig {
    #[serde(default)]
    pub record: Option<i64>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl LimitSource for ErrorLimitConfig {
    fn record_limit(&self) -> Option<i64> {
        self.record
    }

    fn percentage_limit(&self) -> Option<f64> {
        self.percentage
    }
}

impl Verify for ErrorLimitConfig {
    fn verify(&mut self) -> super::Result<()> {
        ThresholdPolicy::try_create_from(&*self)?;
        Ok(())
    }
}
