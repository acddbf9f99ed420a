//! Human-readable renderers for comparison results.
//!
//! Informational only: the structured results are the source of truth.

pub mod data_set;
pub mod difference;

pub use data_set::render_data_set_comparison;
pub use difference::render_difference;
