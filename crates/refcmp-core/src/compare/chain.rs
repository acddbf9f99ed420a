//! Comparator strategies and the chain that dispatches between them.

use tracing::trace;

use super::context::CompareContext;
use super::difference::Difference;
use super::leniency::Leniency;
use super::strategies::{
    CollectionComparator, MapComparator, NumericWideningComparator, ObjectComparator,
    SimpleCasesComparator,
};
use crate::errors::{CompareError, ExError};
use crate::reflect::{resolve, Reflect, Shape};

/// A value with indirections already followed, paired with its shape.
pub struct Operand<'a> {
    pub value: &'a dyn Reflect,
    pub shape: Shape<'a>,
}

impl<'a> Operand<'a> {
    pub fn resolve(value: &'a dyn Reflect) -> Self {
        let (value, shape) = resolve(value);
        Self { value, shape }
    }

    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }
}

/// One comparison strategy.
///
/// `can_handle` must be pure and cheap. `compare` is only called on pairs
/// the strategy claimed, and returns `Ok(None)` iff the pair is equal.
/// Aggregate strategies recurse through `chain`.
pub trait Comparator: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, left: &Operand<'_>, right: &Operand<'_>) -> bool;

    fn compare<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        ctx: &mut CompareContext,
        chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError>;
}

/// Ordered strategies; the first one that claims a pair compares it.
pub struct ComparatorChain {
    comparators: Vec<Box<dyn Comparator>>,
}

impl ComparatorChain {
    /// Build a chain from explicit strategies.
    ///
    /// # Errors
    ///
    /// `InvalidChain` if `comparators` is empty.
    pub fn new(comparators: Vec<Box<dyn Comparator>>) -> Result<Self, ExError> {
        if comparators.is_empty() {
            return Err(ExError::from(CompareError::EmptyChain).with_op("build_chain"));
        }
        Ok(Self { comparators })
    }

    /// The standard chain for a leniency configuration.
    ///
    /// Numeric widening is only present under lenient numbers.
    pub fn for_leniency(leniency: &Leniency) -> Self {
        let mut comparators: Vec<Box<dyn Comparator>> =
            vec![Box::new(SimpleCasesComparator::new(leniency))];
        if leniency.lenient_numbers() {
            comparators.push(Box::new(NumericWideningComparator));
        }
        comparators.push(Box::new(CollectionComparator::new(leniency)));
        comparators.push(Box::new(MapComparator::new(leniency)));
        comparators.push(Box::new(ObjectComparator::new(leniency)));
        Self { comparators }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.comparators.iter().map(|c| c.name()).collect()
    }

    /// Compare two values at the context's current path.
    ///
    /// # Errors
    ///
    /// `Uncomparable` when no strategy claims the pair; errors raised by
    /// nested comparisons are propagated unchanged.
    pub fn compare<'a>(
        &self,
        left: &'a dyn Reflect,
        right: &'a dyn Reflect,
        ctx: &mut CompareContext,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let left = Operand::resolve(left);
        let right = Operand::resolve(right);

        let Some(comparator) = self
            .comparators
            .iter()
            .find(|c| c.can_handle(&left, &right))
        else {
            return Err(ExError::from(CompareError::Uncomparable {
                left_type: left.type_name().to_string(),
                right_type: right.type_name().to_string(),
                path: ctx.path_string(),
            })
            .with_op("compare"));
        };

        trace!(
            strategy = comparator.name(),
            path = %ctx.path_string(),
            left = left.shape.label(),
            right = right.shape.label(),
            "strategy selected"
        );
        comparator.compare(left, right, ctx, self)
    }
}

impl std::fmt::Debug for ComparatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorChain")
            .field("comparators", &self.names())
            .finish()
    }
}
