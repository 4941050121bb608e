mod error;
pub mod stdio;

pub use error::{Error, Result};
pub use stdio::StdioInbound;

use std::path::Path;

use tokio::io::{AsyncBufRead, BufReader};

use crate::config::InboundConfig;

/// Buffered source of input lines.
pub type Input = Box<dyn AsyncBufRead + Send + Unpin>;

/// Opens `path` for reading, or stdin when no path is given.
pub async fn open(path: Option<&Path>) -> Result<Input> {
    let input: Input = match path {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    Ok(input)
}

pub fn try_create_from(cfg: InboundConfig) -> Result<StdioInbound> {
    match cfg {
        InboundConfig::Stdio(cfg) => StdioInbound::try_create_from(cfg),
    }
}
