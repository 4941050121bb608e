use serde::{Deserialize, Serialize};

use crate::core::transform::{FieldTransform, Param};

use super::Verify;

/// One `[[transforms]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Param>,
    /// Plugin whose loader context the transform runs under.
    #[serde(default)]
    pub plugin: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Verify for TransformConfig {
    fn verify(&mut self) -> super::Result<()> {
        if self.name.is_empty() {
            return Err(super::Error::EmptyField("transforms", "name"));
        }

        if matches!(self.plugin.as_deref(), Some("")) {
            return Err(super::Error::EmptyField("transforms", "plugin"));
        }

        FieldTransform::try_create_from(&self.name, &self.parameters)?;
        Ok(())
    }
}
