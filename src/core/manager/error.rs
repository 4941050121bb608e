use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] crate::config::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] crate::core::transform::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Monitor(#[from] crate::core::monitor::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Inbound(#[from] crate::core::inbound::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Outbound(#[from] crate::core::outbound::Error),
    #[error("Job has been cancelled")]
    Cancelled,
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),
}

pub type Result<T> = miette::Result<T, Error>;
