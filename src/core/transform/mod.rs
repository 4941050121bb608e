mod base;
pub mod chain;
mod error;
pub mod pad;
pub mod param;
pub mod replace;
pub mod substr;

pub use base::Transform;
pub use chain::{DirtyRecord, TransformChain};
pub use error::{Error, Result};
pub use pad::PadTransform;
pub use param::Param;
pub use replace::ReplaceTransform;
pub use substr::SubstrTransform;

use log::info;

use crate::config::transform::TransformConfig;

use super::loader::{LoaderRegistry, PluginKind};

/// A built-in transform with its arguments already validated.
#[derive(Debug, Clone)]
pub enum FieldTransform {
    Replace(ReplaceTransform),
    Substr(SubstrTransform),
    Pad(PadTransform),
}

impl FieldTransform {
    pub fn try_create_from(name: &str, params: &[Param]) -> Result<Self> {
        let transform = match name {
            replace::REPLACE_TRANSFORM_NAME => {
                FieldTransform::Replace(ReplaceTransform::try_create_from(params)?)
            }
            substr::SUBSTR_TRANSFORM_NAME => {
                FieldTransform::Substr(SubstrTransform::try_create_from(params)?)
            }
            pad::PAD_TRANSFORM_NAME => FieldTransform::Pad(PadTransform::try_create_from(params)?),
            _ => return Err(Error::UnknownTransform(name.to_string())),
        };

        Ok(transform)
    }
}

impl Transform for FieldTransform {
    fn name(&self) -> &str {
        match self {
            FieldTransform::Replace(t) => t.name(),
            FieldTransform::Substr(t) => t.name(),
            FieldTransform::Pad(t) => t.name(),
        }
    }

    fn evaluate(&self, record: &mut crate::core::types::Record) -> Result<()> {
        match self {
            FieldTransform::Replace(t) => t.evaluate(record),
            FieldTransform::Substr(t) => t.evaluate(record),
            FieldTransform::Pad(t) => t.evaluate(record),
        }
    }
}

/// Builds the chain for a job. Parameter problems surface here, before any
/// record is read.
pub fn try_create_chain(
    cfgs: &[TransformConfig],
    registry: &LoaderRegistry,
) -> Result<TransformChain> {
    let mut chain = TransformChain::new();

    for cfg in cfgs {
        let transform = Box::new(FieldTransform::try_create_from(&cfg.name, &cfg.parameters)?);
        chain = match &cfg.plugin {
            Some(plugin) => {
                let ctx = registry.get_or_create(PluginKind::Transformer, plugin);
                info!("Transform {} runs under loader context {}", cfg.name, ctx);
                chain.push_isolated(transform, ctx)
            }
            None => chain.push(transform),
        };
    }

    Ok(chain)
}
