use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Index out of bounds: index {0}, len {1}")]
    IndexOutOfBounds(usize, usize),
}

pub type Result<T> = std::result::Result<T, Error>;
