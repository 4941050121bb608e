use std::io::Write;

use crate::{
    config::outbound::stdio::{Io, StdioOutboundConfig},
    core::types::Record,
};

use super::base::RecordSender;

/// Writes each record as one delimited line.
pub struct StdioOutbound {
    io: Io,
    delimiter: char,
    null_literal: String,
}

impl StdioOutbound {
    pub fn try_create_from(cfg: StdioOutboundConfig) -> super::Result<Self> {
        Ok(StdioOutbound {
            io: cfg.io,
            delimiter: cfg.delimiter,
            null_literal: cfg.null_literal,
        })
    }

    fn format(&self, record: &Record) -> String {
        let mut delimiter = [0u8; 4];
        let delimiter: &str = self.delimiter.encode_utf8(&mut delimiter);

        record
            .columns()
            .iter()
            .map(|column| match column.as_string() {
                Some(s) => s.into_owned(),
                None => self.null_literal.clone(),
            })
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl RecordSender for StdioOutbound {
    fn send(&self, record: Record) -> super::Result<()> {
        let line = self.format(&record);

        // the lock keeps a line from interleaving with other workers
        match self.io {
            Io::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
            Io::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
        }

        Ok(())
    }

    fn flush(&self) -> super::Result<()> {
        match self.io {
            Io::Stdout => std::io::stdout().flush()?,
            Io::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }
}
