//! refcmp Core - structural comparison of values and table rows
//!
//! This crate provides:
//! - A `Reflect` view of values (std types, chrono, serde_json, user types
//!   registered with `reflect_object!` / `reflect_enum!`)
//! - A cycle-safe, leniency-aware comparator chain producing path-qualified
//!   differences
//! - A best-match row matcher for verifying table contents against an
//!   expected data set
//! - Assertion helpers, human-readable reports, TOML settings
//! - Error and logging facilities

pub use refcmp_core_types as core_types;

pub mod compare;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod logging_facility;
pub mod reflect;
pub mod reflection_assert;
pub mod report;

// Re-export commonly used types
pub use compare::{Difference, DifferenceReport, Leniency, LeniencyMode, ReflectionComparator};
pub use config::ComparisonSettings;
pub use dataset::{DataSetComparator, DataSetComparison, DataSetSettings, Row};
pub use errors::{CompareError, ExError, ExErrorKind, Result};
pub use reflect::Reflect;
