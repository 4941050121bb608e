use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{name} illegal parameter, paras: {params} => {reason}")]
    IllegalParameter {
        name: String,
        params: String,
        reason: String,
    },
    #[error("{name} run exception: {reason}")]
    RunException { name: String, reason: String },
    #[error("Unknown transform: {0}")]
    UnknownTransform(String),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Send(#[from] crate::core::outbound::Error),
}

impl Error {
    pub fn run_exception<T: ToString>(name: &str, reason: T) -> Self {
        Error::RunException {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error stops the job instead of marking one record dirty.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::RunException { .. })
    }
}

pub type Result<T> = miette::Result<T, Error>;
