//! Tabular data-set verification.
//!
//! Expected rows (typically loaded from a test fixture) are matched against
//! the rows actually present in a store. Each cell goes through the same
//! [`ReflectionComparator`](crate::compare::ReflectionComparator) used for
//! in-memory values.
//!
//! ```
//! use refcmp_core::dataset::{DataSetComparator, InMemoryTables, QualifiedTable, Row};
//!
//! let orders = QualifiedTable::new("sales", "orders");
//! let actual = InMemoryTables::new()
//!     .with_row(Row::new(orders.clone()).with_identifier("1").with_value("id", 1).with_value("total", 9.5));
//! let expected = vec![Row::new(orders.clone()).with_value("id", 1)];
//!
//! let result = DataSetComparator::default()
//!     .compare(&mut expected.into_iter(), &actual)
//!     .unwrap();
//! assert!(result.is_match());
//! ```

pub mod comparison;
pub mod matcher;
pub mod model;
pub mod source;

pub use comparison::{ColumnDifference, DataSetComparison, RowComparison, TableComparison};
pub use matcher::{DataSetComparator, DataSetSettings};
pub use model::{ColumnValue, Datum, QualifiedTable, Row};
pub use source::{ActualRowSource, ExpectedRowSource, InMemoryTables};
