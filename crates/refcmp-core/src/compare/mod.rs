//! Structural comparison engine.
//!
//! [`ReflectionComparator`] walks two values through a [`ComparatorChain`]
//! of strategies and returns `None` when they are equal under the active
//! [`Leniency`], or the [`Difference`] explaining why they are not.
//!
//! ## Entry point
//!
//! ```
//! use refcmp_core::compare::{Leniency, ReflectionComparator};
//!
//! let comparator = ReflectionComparator::new(Leniency::lenient());
//! let (expected, actual) = (vec![1, 2, 3], vec![3, 1, 2]);
//! let diff = comparator.compare(&expected, &actual).unwrap();
//! assert!(diff.is_none());
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: the same inputs and leniency give the same result.
//! - **Cycle safety**: a left/right pair reached again while it is still
//!   being compared is treated as equal.
//! - **No partial state**: every call starts from an empty path and visited
//!   set, and leaves nothing behind.

pub mod chain;
pub mod context;
pub mod difference;
pub mod leniency;
pub mod strategies;

pub use chain::{Comparator, ComparatorChain, Operand};
pub use context::{CompareContext, VisitedPair};
pub use difference::{render_path, Difference, DifferenceKind, DifferenceReport, PathSegment};
pub use leniency::{Leniency, LeniencyMode};

use crate::errors::ExError;
use crate::reflect::Reflect;
use crate::{log_op_end, log_op_error, log_op_start};

/// Compares arbitrary reflected values under one leniency configuration.
#[derive(Debug)]
pub struct ReflectionComparator {
    leniency: Leniency,
    chain: ComparatorChain,
}

impl ReflectionComparator {
    /// Comparator with the standard chain for `leniency`.
    pub fn new(leniency: Leniency) -> Self {
        let chain = ComparatorChain::for_leniency(&leniency);
        Self { leniency, chain }
    }

    pub fn strict() -> Self {
        Self::new(Leniency::strict())
    }

    pub fn lenient() -> Self {
        Self::new(Leniency::lenient())
    }

    /// Comparator running a custom chain.
    ///
    /// `leniency` is only recorded for logging; the strategies carry their
    /// own configuration.
    pub fn with_chain(leniency: Leniency, chain: ComparatorChain) -> Self {
        Self { leniency, chain }
    }

    pub fn leniency(&self) -> &Leniency {
        &self.leniency
    }

    pub fn chain(&self) -> &ComparatorChain {
        &self.chain
    }

    /// Compare `left` (expected) with `right` (actual).
    ///
    /// # Errors
    ///
    /// `Uncomparable` if some pair inside the two graphs is claimed by no
    /// strategy (for example two opaque values).
    pub fn compare<'a>(
        &self,
        left: &'a dyn Reflect,
        right: &'a dyn Reflect,
    ) -> Result<Option<Difference<'a>>, ExError> {
        log_op_start!("compare_values", leniency = %self.leniency);
        let start = std::time::Instant::now();

        let result = self.find_difference(left, right).map_err(|e| {
            log_op_error!(
                "compare_values",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "compare_values",
            duration_ms = start.elapsed().as_millis() as u64,
            is_match = result.is_none()
        );
        Ok(result)
    }

    /// Whether `left` and `right` are equal under this comparator.
    pub fn is_equal(&self, left: &dyn Reflect, right: &dyn Reflect) -> Result<bool, ExError> {
        Ok(self.compare(left, right)?.is_none())
    }

    /// Same as [`compare`](Self::compare) without operation logging; used
    /// for the many cell-level comparisons of the row matcher.
    pub(crate) fn find_difference<'a>(
        &self,
        left: &'a dyn Reflect,
        right: &'a dyn Reflect,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let mut ctx = CompareContext::new();
        self.chain.compare(left, right, &mut ctx)
    }
}

impl Default for ReflectionComparator {
    fn default() -> Self {
        Self::strict()
    }
}
