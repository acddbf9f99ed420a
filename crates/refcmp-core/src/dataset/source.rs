//! Row sources feeding the matcher.

use std::collections::BTreeMap;

use super::model::{QualifiedTable, Row};
use crate::errors::ExError;

/// Supplies expected rows one at a time.
///
/// Any `Iterator<Item = Row>` is an expected row source.
pub trait ExpectedRowSource {
    /// # Errors
    ///
    /// Implementations report their own failures, usually as `RowSource`.
    fn next_row(&mut self) -> Result<Option<Row>, ExError>;
}

impl<I> ExpectedRowSource for I
where
    I: Iterator<Item = Row>,
{
    fn next_row(&mut self) -> Result<Option<Row>, ExError> {
        Ok(self.next())
    }
}

/// Supplies all actual rows of a table in one read.
pub trait ActualRowSource {
    /// # Errors
    ///
    /// Implementations report their own failures, usually as `RowSource`.
    fn rows(&self, table: &QualifiedTable) -> Result<Vec<Row>, ExError>;
}

/// Actual rows held in memory, per table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTables {
    tables: BTreeMap<QualifiedTable, Vec<Row>>,
}

impl InMemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to its table, after the rows already there.
    pub fn insert(&mut self, row: Row) {
        self.tables.entry(row.table.clone()).or_default().push(row);
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.insert(row);
        self
    }

    pub fn row_count(&self, table: &QualifiedTable) -> usize {
        self.tables.get(table).map_or(0, Vec::len)
    }
}

impl FromIterator<Row> for InMemoryTables {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        let mut tables = Self::new();
        for row in iter {
            tables.insert(row);
        }
        tables
    }
}

impl ActualRowSource for InMemoryTables {
    fn rows(&self, table: &QualifiedTable) -> Result<Vec<Row>, ExError> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterator_is_expected_source() {
        let table = QualifiedTable::new("s", "t");
        let mut source = vec![Row::new(table.clone()).with_value("a", 1)].into_iter();
        assert!(source.next_row().unwrap().is_some());
        assert!(source.next_row().unwrap().is_none());
    }

    #[test]
    fn test_in_memory_tables_keep_insertion_order() {
        let table = QualifiedTable::new("s", "t");
        let tables: InMemoryTables = vec![
            Row::new(table.clone()).with_identifier("1"),
            Row::new(QualifiedTable::new("s", "other")),
            Row::new(table.clone()).with_identifier("2"),
        ]
        .into_iter()
        .collect();

        let rows = tables.rows(&table).unwrap();
        let ids: Vec<_> = rows.iter().filter_map(|r| r.identifier.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(tables.row_count(&QualifiedTable::new("s", "missing")), 0);
    }
}
