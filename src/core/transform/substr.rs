use crate::{
    core::types::{Column, Record},
    utils::text::{byte_offset, char_len},
};

use super::{
    param::{Param, Params},
    Error, Transform,
};

pub const SUBSTR_TRANSFORM_NAME: &str = "dx_substr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstrParams {
    pub column: usize,
    pub start: usize,
    pub length: usize,
}

impl SubstrParams {
    /// Parses `[column, "start", "length"]`.
    pub fn try_create_from(raw: &[Param]) -> super::Result<Self> {
        let params = Params::new(SUBSTR_TRANSFORM_NAME, raw);
        params.expect_len(3)?;

        Ok(Self {
            column: params.column_index(0)?,
            start: params.numeric_string(1)?,
            length: params.numeric_string(2)?,
        })
    }
}

/// Keeps `length` characters of a column starting at `start`.
#[derive(Debug, Clone)]
pub struct SubstrTransform {
    params: SubstrParams,
}

impl SubstrTransform {
    pub fn new(params: SubstrParams) -> Self {
        Self { params }
    }

    pub fn try_create_from(raw: &[Param]) -> super::Result<Self> {
        Ok(Self::new(SubstrParams::try_create_from(raw)?))
    }

    fn substr(&self, value: &str) -> super::Result<String> {
        let SubstrParams { start, length, .. } = self.params;

        let len = char_len(value);
        if start > len {
            return Err(Error::run_exception(
                SUBSTR_TRANSFORM_NAME,
                format!(
                    "{} startIndex({}) out of range({})",
                    SUBSTR_TRANSFORM_NAME, start, len
                ),
            ));
        }

        let from = byte_offset(value, start);
        if start.saturating_add(length) >= len {
            return Ok(value[from..].to_string());
        }

        Ok(value[from..byte_offset(value, start + length)].to_string())
    }
}

impl Transform for SubstrTransform {
    fn name(&self) -> &str {
        SUBSTR_TRANSFORM_NAME
    }

    fn evaluate(&self, record: &mut Record) -> super::Result<()> {
        let index = self.params.column;
        let column = record
            .get(index)
            .map_err(|e| Error::run_exception(SUBSTR_TRANSFORM_NAME, e))?;

        let sub = match column.as_string() {
            Some(value) => self.substr(&value)?,
            None => return Ok(()),
        };

        record
            .set(index, Column::String(sub))
            .map_err(|e| Error::run_exception(SUBSTR_TRANSFORM_NAME, e))
    }
}
