use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Error;

/// One untyped transform argument as written in the job configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Param {
    pub fn type_name(&self) -> &'static str {
        match self {
            Param::Int(_) => "int",
            Param::Float(_) => "float",
            Param::Bool(_) => "bool",
            Param::String(_) => "string",
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Int(v) => write!(f, "{}", v),
            Param::Float(v) => write!(f, "{}", v),
            Param::Bool(v) => write!(f, "{}", v),
            Param::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Param::Int(v.into())
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::String(v.to_string())
    }
}

/// Positional accessor over the raw arguments of one transform.
///
/// Every failure is reported as [`Error::IllegalParameter`] carrying the whole
/// argument list.
pub struct Params<'a> {
    name: &'a str,
    raw: &'a [Param],
}

impl<'a> Params<'a> {
    pub fn new(name: &'a str, raw: &'a [Param]) -> Self {
        Self { name, raw }
    }

    pub fn illegal<T: ToString>(&self, reason: T) -> Error {
        let params = self
            .raw
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Error::IllegalParameter {
            name: self.name.to_string(),
            params: format!("[{}]", params),
            reason: reason.to_string(),
        }
    }

    pub fn expect_len(&self, len: usize) -> super::Result<()> {
        if self.raw.len() != len {
            return Err(self.illegal(format!("{} paras must be {}", self.name, len)));
        }
        Ok(())
    }

    fn get(&self, index: usize) -> super::Result<&'a Param> {
        self.raw
            .get(index)
            .ok_or_else(|| self.illegal(format!("missing parameter {}", index)))
    }

    /// An integer argument naming a column position.
    pub fn column_index(&self, index: usize) -> super::Result<usize> {
        match self.get(index)? {
            Param::Int(v) => usize::try_from(*v)
                .map_err(|_| self.illegal(format!("column index {} is negative", v))),
            other => Err(self.illegal(format!(
                "parameter {} expects int, got {}",
                index,
                other.type_name()
            ))),
        }
    }

    pub fn string(&self, index: usize) -> super::Result<&'a str> {
        match self.get(index)? {
            Param::String(v) => Ok(v),
            other => Err(self.illegal(format!(
                "parameter {} expects string, got {}",
                index,
                other.type_name()
            ))),
        }
    }

    /// A string argument holding a non-negative integer, e.g. `"6"`.
    pub fn numeric_string(&self, index: usize) -> super::Result<usize> {
        let s = self.string(index)?;
        s.parse::<usize>()
            .map_err(|e| self.illegal(format!("For input string: \"{}\": {}", s, e)))
    }
}
