use std::{borrow::Cow, fmt::Display};

use serde::{Deserialize, Serialize};

/// A single typed cell of a [`super::Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Null,
    String(String),
    Long(i64),
    Double(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Date(chrono::DateTime<chrono::Utc>),
}

impl Column {
    /// Canonical string form of the cell. `None` only for null.
    pub fn as_string(&self) -> Option<Cow<'_, str>> {
        match self {
            Column::Null => None,
            Column::String(s) => Some(Cow::Borrowed(s.as_str())),
            Column::Long(n) => Some(Cow::Owned(n.to_string())),
            Column::Double(n) => Some(Cow::Owned(n.to_string())),
            Column::Bool(b) => Some(Cow::Owned(b.to_string())),
            Column::Bytes(bytes) => Some(String::from_utf8_lossy(bytes)),
            Column::Date(date) => Some(Cow::Owned(date.to_rfc3339())),
        }
    }
}

impl From<String> for Column {
    fn from(s: String) -> Self {
        Column::String(s)
    }
}

impl From<&str> for Column {
    fn from(s: &str) -> Self {
        Column::String(s.to_string())
    }
}

impl From<i64> for Column {
    fn from(n: i64) -> Self {
        Column::Long(n)
    }
}

impl From<f64> for Column {
    fn from(n: f64) -> Self {
        Column::Double(n)
    }
}

impl From<bool> for Column {
    fn from(b: bool) -> Self {
        Column::Bool(b)
    }
}

impl From<Vec<u8>> for Column {
    fn from(bytes: Vec<u8>) -> Self {
        Column::Bytes(bytes)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Column {
    fn from(date: chrono::DateTime<chrono::Utc>) -> Self {
        Column::Date(date)
    }
}

impl<T> From<Option<T>> for Column
where
    T: Into<Column>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Column::Null, Into::into)
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_string() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "null"),
        }
    }
}
