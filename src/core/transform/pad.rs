use crate::{
    core::types::{Column, Record},
    utils::text::{char_len, prefix},
};

use super::{
    param::{Param, Params},
    Error, Transform,
};

pub const PAD_TRANSFORM_NAME: &str = "dx_pad";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadParams {
    pub column: usize,
    pub side: PadSide,
    pub length: usize,
    pub pad: String,
}

impl PadParams {
    /// Parses `[column, "l" | "r", "length", "pad"]`.
    pub fn try_create_from(raw: &[Param]) -> super::Result<Self> {
        let params = Params::new(PAD_TRANSFORM_NAME, raw);
        params.expect_len(4)?;

        let column = params.column_index(0)?;
        let side = match params.string(1)? {
            "l" => PadSide::Left,
            "r" => PadSide::Right,
            other => {
                return Err(params.illegal(format!("pad side must be l or r, got {}", other)))
            }
        };
        let length = params.numeric_string(2)?;
        let pad = params.string(3)?;
        if pad.is_empty() {
            return Err(params.illegal("pad string is empty"));
        }

        Ok(Self {
            column,
            side,
            length,
            pad: pad.to_string(),
        })
    }
}

/// Pads a column to exactly `length` characters, truncating longer values.
#[derive(Debug, Clone)]
pub struct PadTransform {
    params: PadParams,
}

impl PadTransform {
    pub fn new(params: PadParams) -> Self {
        Self { params }
    }

    pub fn try_create_from(raw: &[Param]) -> super::Result<Self> {
        Ok(Self::new(PadParams::try_create_from(raw)?))
    }

    fn pad(&self, value: &str) -> String {
        let PadParams {
            side,
            length,
            ref pad,
            ..
        } = self.params;

        let len = char_len(value);
        if length <= len {
            return prefix(value, length).to_string();
        }

        let filler = pad.chars().cycle().take(length - len).collect::<String>();
        match side {
            PadSide::Left => format!("{}{}", filler, value),
            PadSide::Right => format!("{}{}", value, filler),
        }
    }
}

impl Transform for PadTransform {
    fn name(&self) -> &str {
        PAD_TRANSFORM_NAME
    }

    fn evaluate(&self, record: &mut Record) -> super::Result<()> {
        let index = self.params.column;
        let column = record
            .get(index)
            .map_err(|e| Error::run_exception(PAD_TRANSFORM_NAME, e))?;

        let padded = match column.as_string() {
            Some(value) => self.pad(&value),
            None => return Ok(()),
        };

        record
            .set(index, Column::String(padded))
            .map_err(|e| Error::run_exception(PAD_TRANSFORM_NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: Column, side: &str, length: &str, pad: &str) -> super::super::Result<Column> {
        let raw: Vec<Param> = vec![0.into(), side.into(), length.into(), pad.into()];
        let t = PadTransform::try_create_from(&raw)?;
        let mut record = Record::new(vec![value]);
        t.evaluate(&mut record)?;
        Ok(record.get(0).unwrap().clone())
    }

    #[test]
    fn test_pad_left_and_right() {
        assert_eq!(run("7".into(), "l", "4", "0").unwrap(), Column::from("0007"));
        assert_eq!(run("ab".into(), "r", "7", "xy").unwrap(), Column::from("abxyxyx"));
        assert_eq!(run(42i64.into(), "l", "5", "*-").unwrap(), Column::from("*-*42"));
    }

    #[test]
    fn test_pad_truncates_long_values() {
        assert_eq!(run("abcdef".into(), "l", "3", "0").unwrap(), Column::from("abc"));
        assert_eq!(run("abc".into(), "r", "3", "0").unwrap(), Column::from("abc"));
    }

    #[test]
    fn test_pad_null_passthrough() {
        assert_eq!(run(Column::Null, "l", "3", "0").unwrap(), Column::Null);
    }

    #[test]
    fn test_pad_illegal_parameters() {
        assert!(matches!(
            run("a".into(), "m", "3", "0"),
            Err(Error::IllegalParameter { .. })
        ));
        assert!(matches!(
            run("a".into(), "l", "3", ""),
            Err(Error::IllegalParameter { .. })
        ));
    }
}
