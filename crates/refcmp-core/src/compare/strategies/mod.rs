//! The standard comparison strategies, in chain order.

mod collection;
mod map;
mod numeric;
mod object;
mod simple;

pub use collection::CollectionComparator;
pub use map::MapComparator;
pub use numeric::NumericWideningComparator;
pub use object::ObjectComparator;
pub use simple::SimpleCasesComparator;

use super::chain::Operand;
use crate::errors::{ExError, ExErrorKind};

/// A strategy was handed a pair it does not claim.
fn unclaimed(strategy: &str, left: &Operand<'_>, right: &Operand<'_>) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(strategy)
        .with_message(format!(
            "{} strategy called on {} vs {}",
            strategy,
            left.shape.label(),
            right.shape.label()
        ))
}
