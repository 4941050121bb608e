use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Column;

/// An ordered, positionally indexed row of columns.
///
/// The column count is fixed at construction: [`Record::set`] replaces a cell
/// but never adds or removes one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    columns: Vec<Column>,
}

impl Record {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> super::Result<&Column> {
        self.columns
            .get(index)
            .ok_or(super::Error::IndexOutOfBounds(index, self.columns.len()))
    }

    pub fn set(&mut self, index: usize, column: Column) -> super::Result<()> {
        let len = self.columns.len();
        let slot = self
            .columns
            .get_mut(index)
            .ok_or(super::Error::IndexOutOfBounds(index, len))?;
        *slot = column;
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl FromIterator<Column> for Record {
    fn from_iter<T: IntoIterator<Item = Column>>(iter: T) -> Self {
        Record::new(iter.into_iter().collect())
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Record {{ {} }}", columns)
    }
}
