//! Result model of a data-set comparison.
//!
//! All types are owned and serializable so a comparison can be stored or
//! rendered after the sources are gone.

use serde::{Deserialize, Serialize};

use super::model::{Datum, QualifiedTable, Row};
use crate::compare::DifferenceReport;

/// One column of an expected row that disagrees with the actual row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDifference {
    pub column_name: String,
    pub expected_value: Datum,
    /// `None` when the actual row has no such column
    pub actual_value: Option<Datum>,
    pub difference: DifferenceReport,
}

/// An expected row paired with its best actual candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowComparison {
    pub expected: Row,
    /// `None` when the table had no candidate rows left
    pub actual: Option<Row>,
    pub column_differences: Vec<ColumnDifference>,
}

impl RowComparison {
    pub fn is_match(&self) -> bool {
        self.actual.is_some() && self.column_differences.is_empty()
    }

    pub fn difference_count(&self) -> usize {
        self.column_differences.len()
    }

    pub fn column_difference(&self, column: &str) -> Option<&ColumnDifference> {
        self.column_differences
            .iter()
            .find(|d| d.column_name == column)
    }
}

/// Outcome for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableComparison {
    pub table: QualifiedTable,
    /// One entry per expected row (markers excluded), in input order
    pub best_row_comparisons: Vec<RowComparison>,
    /// Expected rows no actual row matched exactly
    pub missing_rows: Vec<Row>,
    pub expected_no_more_records_but_found_more: bool,
}

impl TableComparison {
    pub fn new(table: QualifiedTable) -> Self {
        Self {
            table,
            best_row_comparisons: Vec::new(),
            missing_rows: Vec::new(),
            expected_no_more_records_but_found_more: false,
        }
    }

    pub fn is_match(&self) -> bool {
        self.missing_rows.is_empty() && !self.expected_no_more_records_but_found_more
    }

    /// Whether the actual row with `identifier` was matched by an expected row.
    pub fn is_matching_row(&self, identifier: &str) -> bool {
        self.best_row_comparisons.iter().any(|c| {
            c.is_match()
                && c.actual
                    .as_ref()
                    .and_then(|row| row.identifier.as_deref())
                    == Some(identifier)
        })
    }

    /// Best comparison recorded for `expected`.
    pub fn best_row_comparison(&self, expected: &Row) -> Option<&RowComparison> {
        self.best_row_comparisons
            .iter()
            .find(|c| &c.expected == expected)
    }

    pub fn matched_row_count(&self) -> usize {
        self.best_row_comparisons
            .iter()
            .filter(|c| c.is_match())
            .count()
    }
}

/// Outcome for a whole data set, tables in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSetComparison {
    pub table_comparisons: Vec<TableComparison>,
}

impl DataSetComparison {
    pub fn is_match(&self) -> bool {
        self.table_comparisons.iter().all(TableComparison::is_match)
    }

    pub fn table_comparison(&self, table: &QualifiedTable) -> Option<&TableComparison> {
        self.table_comparisons.iter().find(|t| &t.table == table)
    }

    pub fn mismatched_tables(&self) -> impl Iterator<Item = &TableComparison> {
        self.table_comparisons.iter().filter(|t| !t.is_match())
    }
}
