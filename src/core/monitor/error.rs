use std::fmt::Display;

use miette::Diagnostic;
use thiserror::Error;

/// Which limit was crossed and by how much.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breach {
    Records { limit: u64, observed: u64 },
    Percentage { limit: f64, observed: f64 },
}

impl Display for Breach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Breach::Records { limit, observed } => write!(
                f,
                "dirty record count check failed, limit is [{}] records but [{}] were caught",
                limit, observed
            ),
            Breach::Percentage { limit, observed } => write!(
                f,
                "dirty record percentage check failed, limit is [{:.6}] but [{:.6}] was caught",
                limit, observed
            ),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Dirty record percentage limit must be within [0.0, 1.0], got {0}")]
    InvalidPercentageLimit(f64),
    #[error("Dirty record limit must be a non-negative integer, got {0}")]
    NegativeRecordLimit(i64),
    #[error("Dirty data limit exceeded: {0}")]
    DirtyDataLimitExceeded(Breach),
}

pub type Result<T> = miette::Result<T, Error>;
