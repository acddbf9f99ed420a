use super::numeric::magnitudes_equal;
use crate::compare::chain::{Comparator, ComparatorChain, Operand};
use crate::compare::context::CompareContext;
use crate::compare::difference::{Difference, DifferenceKind};
use crate::compare::leniency::Leniency;
use crate::errors::ExError;
use crate::reflect::{Identity, Scalar, Shape};

/// Identical references, nulls and leaf values.
///
/// Leaves are scalars, enum constants and date/time values. Numbers are
/// only equal when they also share their concrete kind; under lenient
/// numbers, mixed-kind pairs are left to numeric widening.
#[derive(Debug, Clone)]
pub struct SimpleCasesComparator {
    lenient_dates: bool,
    lenient_numbers: bool,
}

impl SimpleCasesComparator {
    pub fn new(leniency: &Leniency) -> Self {
        Self {
            lenient_dates: leniency.lenient_dates(),
            lenient_numbers: leniency.lenient_numbers(),
        }
    }
}

fn identical(left: &Operand<'_>, right: &Operand<'_>) -> bool {
    Identity::of(left.value) == Identity::of(right.value)
}

impl Comparator for SimpleCasesComparator {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn can_handle(&self, left: &Operand<'_>, right: &Operand<'_>) -> bool {
        if identical(left, right) {
            return true;
        }
        match (&left.shape, &right.shape) {
            (Shape::Null, _) | (_, Shape::Null) => true,
            (Shape::Scalar(Scalar::Number(a)), Shape::Scalar(Scalar::Number(b)))
                if self.lenient_numbers && a.kind != b.kind =>
            {
                false
            }
            (l, r) => l.is_leaf() || r.is_leaf(),
        }
    }

    fn compare<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        ctx: &mut CompareContext,
        _chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError> {
        if identical(&left, &right) {
            return Ok(None);
        }

        let kind = match (&left.shape, &right.shape) {
            (Shape::Null, Shape::Null) => return Ok(None),
            (Shape::Null, _) => DifferenceKind::LeftNull,
            (_, Shape::Null) => DifferenceKind::RightNull,
            (Shape::Scalar(a), Shape::Scalar(b)) if scalars_equal(a, b) => return Ok(None),
            (Shape::Enum(a), Shape::Enum(b)) if a == b => return Ok(None),
            (Shape::Temporal(a), Shape::Temporal(b)) => {
                let equal = if self.lenient_dates {
                    a.instant == b.instant
                } else {
                    a == b
                };
                if equal {
                    return Ok(None);
                }
                DifferenceKind::DifferentValues
            }
            _ => DifferenceKind::DifferentValues,
        };

        Ok(Some(Difference::new(
            kind,
            ctx.current_path(),
            Some(left.value),
            Some(right.value),
        )))
    }
}

fn scalars_equal(a: &Scalar<'_>, b: &Scalar<'_>) -> bool {
    match (a, b) {
        (Scalar::Number(x), Scalar::Number(y)) => x.kind == y.kind && magnitudes_equal(x, y),
        _ => a == b,
    }
}
