use crate::compare::chain::{Comparator, ComparatorChain, Operand};
use crate::compare::context::{CompareContext, VisitedPair};
use crate::compare::difference::{Difference, DifferenceKind, PathSegment};
use crate::compare::leniency::Leniency;
use crate::errors::ExError;
use crate::reflect::{resolve, Field, Shape};

/// Fallback for any remaining pair of aggregates.
///
/// Objects of the same type are compared field by field; every other
/// combination of aggregates has different types. A pair already being
/// compared further up the stack is equal, which ends cycles.
#[derive(Debug, Clone)]
pub struct ObjectComparator {
    ignore_defaults: bool,
}

impl ObjectComparator {
    pub fn new(leniency: &Leniency) -> Self {
        Self {
            ignore_defaults: leniency.ignore_defaults(),
        }
    }

    fn compare_fields<'a>(
        &self,
        left_fields: Vec<Field<'a>>,
        right_fields: &[Field<'a>],
        ctx: &mut CompareContext,
        chain: &ComparatorChain,
    ) -> Result<Vec<Difference<'a>>, ExError> {
        let mut children = Vec::new();
        for field in left_fields {
            if self.ignore_defaults && resolve(field.value).1.is_default() {
                continue;
            }
            let segment = PathSegment::Field(field.name.to_string());
            match right_fields.iter().find(|f| f.name == field.name) {
                None => {
                    let mut path = ctx.current_path();
                    path.push(segment);
                    children.push(Difference::new(
                        DifferenceKind::MissingField,
                        path,
                        Some(field.value),
                        None,
                    ));
                }
                Some(other) => {
                    if let Some(nested) =
                        ctx.at(segment, |ctx| chain.compare(field.value, other.value, ctx))?
                    {
                        children.push(nested);
                    }
                }
            }
        }
        Ok(children)
    }
}

impl Comparator for ObjectComparator {
    fn name(&self) -> &'static str {
        "object"
    }

    fn can_handle(&self, left: &Operand<'_>, right: &Operand<'_>) -> bool {
        left.shape.is_aggregate() && right.shape.is_aggregate()
    }

    fn compare<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        ctx: &mut CompareContext,
        chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let pair = VisitedPair::of(left.value, right.value);
        if ctx.is_in_progress(&pair) {
            return Ok(None);
        }

        let (left_value, right_value) = (left.value, right.value);
        let (left_fields, right_fields) = match (left.shape, right.shape) {
            (Shape::Object(l), Shape::Object(r))
                if left_value.type_name() == right_value.type_name() =>
            {
                (l, r)
            }
            _ => {
                return Ok(Some(
                    Difference::new(
                        DifferenceKind::DifferentTypes,
                        ctx.current_path(),
                        Some(left_value),
                        Some(right_value),
                    )
                    .with_message(format!(
                        "{}: {} vs {}",
                        DifferenceKind::DifferentTypes.message(),
                        left_value.type_name(),
                        right_value.type_name()
                    )),
                ))
            }
        };

        ctx.enter(pair);
        let children = self.compare_fields(left_fields, &right_fields, ctx, chain);
        ctx.leave(&pair);

        let children = children?;
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            Difference::new(
                DifferenceKind::DifferentFieldValues,
                ctx.current_path(),
                Some(left_value),
                Some(right_value),
            )
            .with_children(children),
        ))
    }
}
