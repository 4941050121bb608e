pub mod error;
pub mod error_limit;
pub mod global;
pub mod inbound;
pub mod outbound;
pub mod transform;

use std::path::Path;

pub use error::{Error, Result};
pub use error_limit::ErrorLimitConfig;
use global::GlobalConfig;
pub use inbound::InboundConfig;
use log::warn;
pub use outbound::OutboundConfig;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader};
use transform::TransformConfig;

pub trait Verify {
    fn verify(&mut self) -> error::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub error_limit: ErrorLimitConfig,
    #[serde(default)]
    pub inbound: InboundConfig,
    #[serde(default)]
    pub outbound: OutboundConfig,
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> error::Result<Self> {
        if !path.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Config file not found: {}", path.display()),
            )));
        }

        if !path.is_file() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Given config file path is not a file: {}", path.display()),
            )));
        }

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let mut config: Config = match ext {
            "json" => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            "toml" => {
                let text = std::fs::read_to_string(path)?;
                toml::de::from_str(&text)?
            }
            _ => return Err(Error::InvalidConfigFileFormat(ext.to_string())),
        };

        config.verify()?;

        Ok(config)
    }
}

impl Verify for Config {
    fn verify(&mut self) -> error::Result<()> {
        self.global.verify()?;
        self.error_limit.verify()?;
        self.inbound.verify()?;
        self.outbound.verify()?;

        // skip disabled items
        self.transforms.retain(|cfg| !cfg.disabled);
        for cfg in &mut self.transforms {
            cfg.verify()?;
        }

        if self.transforms.is_empty() {
            warn!("No transforms configured, records are passed through unchanged");
        }

        Ok(())
    }
}
