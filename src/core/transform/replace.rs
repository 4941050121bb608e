use crate::{
    core::types::{Column, Record},
    utils::text::{byte_offset, char_len},
};

use super::{
    param::{Param, Params},
    Error, Transform,
};

pub const REPLACE_TRANSFORM_NAME: &str = "dx_replace";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceParams {
    pub column: usize,
    pub start: usize,
    pub length: usize,
    pub replacement: String,
}

impl ReplaceParams {
    /// Parses `[column, "start", "length", "replacement"]`.
    pub fn try_create_from(raw: &[Param]) -> super::Result<Self> {
        let params = Params::new(REPLACE_TRANSFORM_NAME, raw);
        params.expect_len(4)?;

        Ok(Self {
            column: params.column_index(0)?,
            start: params.numeric_string(1)?,
            length: params.numeric_string(2)?,
            replacement: params.string(3)?.to_string(),
        })
    }
}

/// Replaces `length` characters of a column, starting at `start`.
///
/// When the range runs past the end of the value, everything from `start`
/// onwards is replaced. Null columns pass through untouched.
#[derive(Debug, Clone)]
pub struct ReplaceTransform {
    params: ReplaceParams,
}

impl ReplaceTransform {
    pub fn new(params: ReplaceParams) -> Self {
        Self { params }
    }

    pub fn try_create_from(raw: &[Param]) -> super::Result<Self> {
        Ok(Self::new(ReplaceParams::try_create_from(raw)?))
    }

    fn replace(&self, value: &str) -> super::Result<String> {
        let ReplaceParams {
            start,
            length,
            ref replacement,
            ..
        } = self.params;

        let len = char_len(value);
        if start > len {
            return Err(Error::run_exception(
                REPLACE_TRANSFORM_NAME,
                format!(
                    "{} startIndex({}) out of range({})",
                    REPLACE_TRANSFORM_NAME, start, len
                ),
            ));
        }

        let head = &value[..byte_offset(value, start)];
        if start.saturating_add(length) >= len {
            return Ok(format!("{}{}", head, replacement));
        }

        let tail = &value[byte_offset(value, start + length)..];
        Ok(format!("{}{}{}", head, replacement, tail))
    }
}

impl Transform for ReplaceTransform {
    fn name(&self) -> &str {
        REPLACE_TRANSFORM_NAME
    }

    fn evaluate(&self, record: &mut Record) -> super::Result<()> {
        let index = self.params.column;
        let column = record
            .get(index)
            .map_err(|e| Error::run_exception(REPLACE_TRANSFORM_NAME, e))?;

        let replaced = match column.as_string() {
            Some(value) => self.replace(&value)?,
            None => return Ok(()),
        };

        record
            .set(index, Column::String(replaced))
            .map_err(|e| Error::run_exception(REPLACE_TRANSFORM_NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(column: i64, start: &str, length: &str, replacement: &str) -> ReplaceTransform {
        let raw: Vec<Param> = vec![column.into(), start.into(), length.into(), replacement.into()];
        ReplaceTransform::try_create_from(&raw).unwrap()
    }

    fn run(value: &str, start: usize, length: usize, replacement: &str) -> super::super::Result<String> {
        let t = transform(0, &start.to_string(), &length.to_string(), replacement);
        let mut record = Record::new(vec![Column::from(value)]);
        t.evaluate(&mut record)?;
        Ok(record.get(0).unwrap().as_string().unwrap().into_owned())
    }

    #[test]
    fn test_replace_in_middle() {
        assert_eq!(run("hello world", 6, 5, "EARTH").unwrap(), "hello EARTH");
        assert_eq!(run("abcdef", 1, 2, "XY").unwrap(), "aXYdef");
        assert_eq!(run("abcdef", 2, 0, "--").unwrap(), "ab--cdef");
    }

    #[test]
    fn test_length_clamped_to_end() {
        assert_eq!(run("abc", 1, 10, "X").unwrap(), "aX");
        assert_eq!(run("abc", 1, 2, "X").unwrap(), "aX");
        assert_eq!(run("abc", 3, 0, "X").unwrap(), "abcX");
        assert_eq!(run("abc", 0, usize::MAX, "X").unwrap(), "X");
    }

    #[test]
    fn test_splice_property() {
        let value = "0123456789";
        let len = value.len();
        for start in 0..=len {
            for length in 0..=len + 2 {
                let got = run(value, start, length, "#").unwrap();
                let expected = if start + length < len {
                    format!("{}#{}", &value[..start], &value[start + length..])
                } else {
                    format!("{}#", &value[..start])
                };
                assert_eq!(got, expected, "start={start} length={length}");
            }
        }
    }

    #[test]
    fn test_multibyte_offsets() {
        assert_eq!(run("数据同步任务", 2, 2, "迁移").unwrap(), "数据迁移任务");
    }

    #[test]
    fn test_start_out_of_range() {
        let err = run("abc", 4, 1, "X").unwrap_err();
        assert!(matches!(err, Error::RunException { .. }));
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("startIndex(4) out of range(3)"));
    }

    #[test]
    fn test_null_passthrough() {
        let t = transform(1, "100", "5", "X");
        let mut record = Record::new(vec![Column::from("keep"), Column::Null]);
        let original = record.clone();

        t.evaluate(&mut record).unwrap();
        assert_eq!(record, original);
    }

    #[test]
    fn test_non_string_column_is_rewritten_as_string() {
        let t = transform(0, "0", "1", "9");
        let mut record = Record::new(vec![Column::from(1234i64)]);

        t.evaluate(&mut record).unwrap();
        assert_eq!(record.get(0).unwrap(), &Column::from("9234"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_missing_column_is_run_exception() {
        let t = transform(3, "0", "1", "X");
        let mut record = Record::new(vec![Column::from("a")]);

        let err = t.evaluate(&mut record).unwrap_err();
        assert!(matches!(err, Error::RunException { .. }));
    }

    #[test]
    fn test_illegal_parameters() {
        let cases: Vec<Vec<Param>> = vec![
            vec![],
            vec![0.into(), "1".into(), "2".into()],
            vec![0.into(), "1".into(), "2".into(), "x".into(), "extra".into()],
            vec![0.into(), "one".into(), "2".into(), "x".into()],
            vec![0.into(), "1".into(), "two".into(), "x".into()],
            vec!["0".into(), "1".into(), "2".into(), "x".into()],
            vec![0.into(), "1".into(), "2".into(), Param::Int(5)],
        ];

        for raw in cases {
            let err = ReplaceTransform::try_create_from(&raw).unwrap_err();
            assert!(
                matches!(err, Error::IllegalParameter { .. }),
                "expected illegal parameter for {raw:?}"
            );
            assert!(err.is_fatal());
        }
    }
}
