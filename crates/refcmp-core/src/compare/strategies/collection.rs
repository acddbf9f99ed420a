use crate::compare::chain::{Comparator, ComparatorChain, Operand};
use crate::compare::context::CompareContext;
use crate::compare::difference::{Difference, DifferenceKind, PathSegment};
use crate::compare::leniency::Leniency;
use crate::errors::ExError;
use crate::reflect::{Reflect, Shape};

/// Two sequences, by position or (under lenient order) as multisets.
#[derive(Debug, Clone)]
pub struct CollectionComparator {
    lenient_order: bool,
    allow_superset: bool,
}

impl CollectionComparator {
    pub fn new(leniency: &Leniency) -> Self {
        Self {
            lenient_order: leniency.lenient_order(),
            allow_superset: leniency.allow_superset(),
        }
    }

    fn compare_in_order<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        items: (Vec<&'a dyn Reflect>, Vec<&'a dyn Reflect>),
        ctx: &mut CompareContext,
        chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let (left_items, right_items) = items;
        if left_items.len() != right_items.len() {
            return Ok(Some(
                Difference::new(
                    DifferenceKind::CollectionSizesDiffer,
                    ctx.current_path(),
                    Some(left.value),
                    Some(right.value),
                )
                .with_message(format!(
                    "{} ({} vs {})",
                    DifferenceKind::CollectionSizesDiffer.message(),
                    left_items.len(),
                    right_items.len()
                )),
            ));
        }

        for (i, (l, r)) in left_items.into_iter().zip(right_items).enumerate() {
            if let Some(nested) = ctx.at(PathSegment::Index(i), |ctx| chain.compare(l, r, ctx))? {
                return Ok(Some(
                    Difference::new(
                        DifferenceKind::DifferentElements,
                        ctx.current_path(),
                        Some(left.value),
                        Some(right.value),
                    )
                    .with_children(vec![nested]),
                ));
            }
        }
        Ok(None)
    }

    fn compare_any_order<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        items: (Vec<&'a dyn Reflect>, Vec<&'a dyn Reflect>),
        ctx: &mut CompareContext,
        chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let (left_items, right_items) = items;
        let mut used = vec![false; right_items.len()];
        let mut children = Vec::new();

        for (i, l) in left_items.iter().copied().enumerate() {
            let mut matched = None;
            for (j, r) in right_items.iter().copied().enumerate() {
                if used[j] {
                    continue;
                }
                if ctx
                    .at(PathSegment::Index(i), |ctx| chain.compare(l, r, ctx))?
                    .is_none()
                {
                    matched = Some(j);
                    break;
                }
            }
            match matched {
                Some(j) => used[j] = true,
                None => children.push(Difference::new(
                    DifferenceKind::NoMatchForElement,
                    element_path(ctx, i),
                    Some(l),
                    None,
                )),
            }
        }

        if !self.allow_superset {
            for (j, r) in right_items.iter().copied().enumerate() {
                if !used[j] {
                    children.push(Difference::new(
                        DifferenceKind::UnexpectedElement,
                        element_path(ctx, j),
                        None,
                        Some(r),
                    ));
                }
            }
        }

        if children.is_empty() {
            return Ok(None);
        }

        let sizes_ok = left_items.len() == right_items.len()
            || (self.allow_superset && right_items.len() > left_items.len());
        let kind = if sizes_ok {
            DifferenceKind::DifferentElements
        } else {
            DifferenceKind::CollectionSizesDiffer
        };
        Ok(Some(
            Difference::new(kind, ctx.current_path(), Some(left.value), Some(right.value))
                .with_children(children),
        ))
    }
}

fn element_path(ctx: &CompareContext, index: usize) -> Vec<PathSegment> {
    let mut path = ctx.current_path();
    path.push(PathSegment::Index(index));
    path
}

impl Comparator for CollectionComparator {
    fn name(&self) -> &'static str {
        "collection"
    }

    fn can_handle(&self, left: &Operand<'_>, right: &Operand<'_>) -> bool {
        matches!((&left.shape, &right.shape), (Shape::Seq(_), Shape::Seq(_)))
    }

    fn compare<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        ctx: &mut CompareContext,
        chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let (left_items, right_items) = match (&left.shape, &right.shape) {
            (Shape::Seq(l), Shape::Seq(r)) => (l.clone(), r.clone()),
            _ => return Err(super::unclaimed(self.name(), &left, &right)),
        };
        let items = (left_items, right_items);
        if self.lenient_order {
            self.compare_any_order(left, right, items, ctx, chain)
        } else {
            self.compare_in_order(left, right, items, ctx, chain)
        }
    }
}
