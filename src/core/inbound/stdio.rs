use tokio::io::{AsyncBufRead, Lines};

use crate::{
    config::inbound::stdio::StdioInboundConfig,
    core::types::{Column, Record},
};

/// Splits delimited text lines into string records.
///
/// A field equal to the null literal becomes a null column. Blank lines are
/// skipped.
pub struct StdioInbound {
    delimiter: char,
    null_literal: String,
}

impl StdioInbound {
    pub fn try_create_from(cfg: StdioInboundConfig) -> super::Result<Self> {
        Ok(StdioInbound {
            delimiter: cfg.delimiter,
            null_literal: cfg.null_literal,
        })
    }

    pub fn parse_line(&self, line: &str) -> Record {
        line.split(self.delimiter)
            .map(|field| {
                if field == self.null_literal {
                    Column::Null
                } else {
                    Column::from(field)
                }
            })
            .collect()
    }

    /// Next non-blank line with any trailing `\r` removed, `None` at EOF.
    ///
    /// Only whole lines are consumed, so dropping the future between lines
    /// loses nothing.
    pub async fn next_line<R>(&self, lines: &mut Lines<R>) -> super::Result<Option<String>>
    where
        R: AsyncBufRead + Unpin,
    {
        while let Some(line) = lines.next_line().await? {
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }

        Ok(None)
    }
}
