//! Best-match row matcher.
//!
//! For every expected row the matcher scores each remaining actual row of
//! the same table by its number of differing columns and keeps the best
//! one (earliest on ties). An exact match consumes the actual row; anything
//! else leaves the pool untouched and records the expected row as missing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::comparison::{ColumnDifference, DataSetComparison, RowComparison, TableComparison};
use super::model::{ColumnValue, Row};
use super::source::{ActualRowSource, ExpectedRowSource};
use crate::compare::{
    CompareContext, Difference, DifferenceKind, Leniency, LeniencyMode, PathSegment,
    ReflectionComparator,
};
use crate::core_types::RequestContext;
use crate::errors::ExError;
use crate::{log_op_end, log_op_error, log_op_start};

/// Settings of the row matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSetSettings {
    /// Match column names exactly instead of ignoring ASCII case
    pub case_sensitive: bool,
    /// Leniency applied to every cell comparison
    pub leniency: Leniency,
    /// Score expected columns the actual row lacks as differences instead
    /// of comparing only the columns both rows carry
    pub missing_columns_differ: bool,
}

impl Default for DataSetSettings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            leniency: Leniency::strict()
                .with(LeniencyMode::LenientNumbers)
                .with(LeniencyMode::LenientDates),
            missing_columns_differ: false,
        }
    }
}

/// Compares expected rows against the rows actually present per table.
#[derive(Debug)]
pub struct DataSetComparator {
    settings: DataSetSettings,
    comparator: ReflectionComparator,
}

struct TableState {
    comparison: TableComparison,
    pool: Vec<Row>,
}

impl DataSetComparator {
    pub fn new(settings: DataSetSettings) -> Self {
        let comparator = ReflectionComparator::new(settings.leniency.clone());
        Self {
            settings,
            comparator,
        }
    }

    pub fn settings(&self) -> &DataSetSettings {
        &self.settings
    }

    /// Compare all expected rows against the actual rows of their tables.
    ///
    /// # Errors
    ///
    /// Failures of either row source, and `Uncomparable` cells.
    pub fn compare(
        &self,
        expected: &mut dyn ExpectedRowSource,
        actual: &dyn ActualRowSource,
    ) -> Result<DataSetComparison, ExError> {
        self.compare_with_context(&RequestContext::new(), expected, actual)
    }

    /// Same as [`compare`](Self::compare), correlated with `ctx` in logs
    /// and errors.
    pub fn compare_with_context(
        &self,
        ctx: &RequestContext,
        expected: &mut dyn ExpectedRowSource,
        actual: &dyn ActualRowSource,
    ) -> Result<DataSetComparison, ExError> {
        log_op_start!(
            "compare_data_set",
            request_id = %ctx.request_id,
            label = ctx.label.as_deref()
        );
        let start = std::time::Instant::now();

        let result = self.compare_tables(expected, actual).map_err(|e| {
            let mut e = e.with_op("compare_data_set").with_request_id(ctx.request_id.clone());
            if let Some(trace_id) = &ctx.trace_id {
                e = e.with_trace_id(trace_id.clone());
            }
            log_op_error!(
                "compare_data_set",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id
            );
            e
        })?;

        log_op_end!(
            "compare_data_set",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %ctx.request_id,
            label = ctx.label.as_deref(),
            is_match = result.is_match()
        );
        Ok(result)
    }

    fn compare_tables(
        &self,
        expected: &mut dyn ExpectedRowSource,
        actual: &dyn ActualRowSource,
    ) -> Result<DataSetComparison, ExError> {
        let mut tables: Vec<TableState> = Vec::new();
        let mut index = HashMap::new();

        while let Some(row) = expected.next_row()? {
            let slot = match index.get(&row.table) {
                Some(slot) => *slot,
                None => {
                    let pool = actual
                        .rows(&row.table)
                        .map_err(|e| e.with_table(row.table.to_string()))?;
                    debug!(table = %row.table, actual_rows = pool.len(), "loaded actual rows");
                    index.insert(row.table.clone(), tables.len());
                    tables.push(TableState {
                        comparison: TableComparison::new(row.table.clone()),
                        pool,
                    });
                    tables.len() - 1
                }
            };
            self.match_row(&mut tables[slot], row)?;
        }

        let table_comparisons = tables
            .into_iter()
            .map(|state| {
                let comparison = state.comparison;
                debug!(
                    table = %comparison.table,
                    expected_rows = comparison.best_row_comparisons.len(),
                    missing_rows = comparison.missing_rows.len(),
                    is_match = comparison.is_match(),
                    "table compared"
                );
                comparison
            })
            .collect();
        Ok(DataSetComparison { table_comparisons })
    }

    fn match_row(&self, state: &mut TableState, expected: Row) -> Result<(), ExError> {
        if expected.is_empty_marker() {
            if !state.pool.is_empty() {
                state.comparison.expected_no_more_records_but_found_more = true;
            }
            return Ok(());
        }

        let mut best: Option<(usize, Vec<ColumnDifference>)> = None;
        for (i, candidate) in state.pool.iter().enumerate() {
            let differences = self
                .column_differences(&expected, candidate)
                .map_err(|e| e.with_table(expected.table.to_string()))?;
            let better = best
                .as_ref()
                .map_or(true, |(_, current)| differences.len() < current.len());
            if better {
                let exact = differences.is_empty();
                best = Some((i, differences));
                if exact {
                    break;
                }
            }
        }

        let comparison = &mut state.comparison;
        match best {
            None => {
                comparison.best_row_comparisons.push(RowComparison {
                    expected: expected.clone(),
                    actual: None,
                    column_differences: Vec::new(),
                });
                comparison.missing_rows.push(expected);
            }
            Some((i, differences)) if differences.is_empty() => {
                let actual = state.pool.remove(i);
                comparison.best_row_comparisons.push(RowComparison {
                    expected,
                    actual: Some(actual),
                    column_differences: differences,
                });
            }
            Some((i, differences)) => {
                comparison.best_row_comparisons.push(RowComparison {
                    expected: expected.clone(),
                    actual: Some(state.pool[i].clone()),
                    column_differences: differences,
                });
                comparison.missing_rows.push(expected);
            }
        }
        Ok(())
    }

    /// Differences over the non-ignored columns of `expected` that `actual`
    /// also carries.
    fn column_differences(
        &self,
        expected: &Row,
        actual: &Row,
    ) -> Result<Vec<ColumnDifference>, ExError> {
        let mut differences = Vec::new();
        for cell in expected.values.iter().filter(|v| !v.ignored) {
            match actual.value(&cell.column, self.settings.case_sensitive) {
                None if self.settings.missing_columns_differ => {
                    differences.push(missing_column(cell));
                }
                None => {}
                Some(other) => {
                    let mut ctx = CompareContext::new();
                    let chain = self.comparator.chain();
                    let difference = ctx.at(PathSegment::Field(cell.column.clone()), |ctx| {
                        chain.compare(&cell.value, &other.value, ctx)
                    })?;
                    if let Some(difference) = difference {
                        differences.push(ColumnDifference {
                            column_name: cell.column.clone(),
                            expected_value: cell.value.clone(),
                            actual_value: Some(other.value.clone()),
                            difference: difference.to_report(),
                        });
                    }
                }
            }
        }
        Ok(differences)
    }
}

impl Default for DataSetComparator {
    fn default() -> Self {
        Self::new(DataSetSettings::default())
    }
}

fn missing_column(cell: &ColumnValue) -> ColumnDifference {
    let report = Difference::new(
        DifferenceKind::MissingField,
        vec![PathSegment::Field(cell.column.clone())],
        Some(&cell.value),
        None,
    )
    .with_message("missing column")
    .to_report();
    ColumnDifference {
        column_name: cell.column.clone(),
        expected_value: cell.value.clone(),
        actual_value: None,
        difference: report,
    }
}
