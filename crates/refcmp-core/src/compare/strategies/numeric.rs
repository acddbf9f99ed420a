use crate::compare::chain::{Comparator, ComparatorChain, Operand};
use crate::compare::context::CompareContext;
use crate::compare::difference::{Difference, DifferenceKind};
use crate::errors::ExError;
use crate::reflect::{Number, NumberValue, Scalar, Shape};

/// Numbers of different width or precision, compared by magnitude.
///
/// Integer pairs compare exactly in 128 bits; any pair involving a float
/// compares as `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericWideningComparator;

fn numbers<'o>(left: &'o Operand<'_>, right: &'o Operand<'_>) -> Option<(&'o Number, &'o Number)> {
    match (&left.shape, &right.shape) {
        (Shape::Scalar(Scalar::Number(a)), Shape::Scalar(Scalar::Number(b))) => Some((a, b)),
        _ => None,
    }
}

impl Comparator for NumericWideningComparator {
    fn name(&self) -> &'static str {
        "numeric_widening"
    }

    fn can_handle(&self, left: &Operand<'_>, right: &Operand<'_>) -> bool {
        matches!(numbers(left, right), Some((a, b)) if a.kind != b.kind)
    }

    fn compare<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        ctx: &mut CompareContext,
        _chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let Some((a, b)) = numbers(&left, &right) else {
            return Err(super::unclaimed(self.name(), &left, &right));
        };
        if magnitudes_equal(a, b) {
            return Ok(None);
        }
        Ok(Some(Difference::new(
            DifferenceKind::DifferentValues,
            ctx.current_path(),
            Some(left.value),
            Some(right.value),
        )))
    }
}

/// Compare two numbers by value, ignoring their kinds. `NaN` equals `NaN`.
pub(crate) fn magnitudes_equal(a: &Number, b: &Number) -> bool {
    match (a.value, b.value) {
        (NumberValue::Signed(x), NumberValue::Signed(y)) => x == y,
        (NumberValue::Unsigned(x), NumberValue::Unsigned(y)) => x == y,
        (NumberValue::Signed(s), NumberValue::Unsigned(u))
        | (NumberValue::Unsigned(u), NumberValue::Signed(s)) => {
            u128::try_from(s).map(|s| s == u).unwrap_or(false)
        }
        _ => {
            let (x, y) = (a.as_f64(), b.as_f64());
            x == y || (x.is_nan() && y.is_nan())
        }
    }
}
