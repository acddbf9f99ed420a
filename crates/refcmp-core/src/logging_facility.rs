//! Structured logging facility for refcmp
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions on emitted events
//!
//! # Usage
//!
//! ```rust
//! use refcmp_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Top-level comparison operations log one `start` and one `end` (or
//! `end_error`) event; per-table details go out at `debug`, strategy
//! selection at `trace`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
