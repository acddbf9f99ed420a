use crate::compare::chain::{Comparator, ComparatorChain, Operand};
use crate::compare::context::CompareContext;
use crate::compare::difference::{Difference, DifferenceKind, PathSegment};
use crate::compare::leniency::Leniency;
use crate::errors::ExError;
use crate::reflect::{render_value, resolve, Reflect, Shape};

/// Two key/value mappings, compared key by key.
///
/// Keys are located on the right through the chain itself, so keys that
/// are objects or lenient-equal numbers still pair up.
#[derive(Debug, Clone)]
pub struct MapComparator {
    ignore_defaults: bool,
}

impl MapComparator {
    pub fn new(leniency: &Leniency) -> Self {
        Self {
            ignore_defaults: leniency.ignore_defaults(),
        }
    }
}

fn key_path(ctx: &CompareContext, key: &dyn Reflect) -> Vec<PathSegment> {
    let mut path = ctx.current_path();
    path.push(PathSegment::Key(render_value(key)));
    path
}

impl Comparator for MapComparator {
    fn name(&self) -> &'static str {
        "map"
    }

    fn can_handle(&self, left: &Operand<'_>, right: &Operand<'_>) -> bool {
        matches!((&left.shape, &right.shape), (Shape::Map(_), Shape::Map(_)))
    }

    fn compare<'a>(
        &self,
        left: Operand<'a>,
        right: Operand<'a>,
        ctx: &mut CompareContext,
        chain: &ComparatorChain,
    ) -> Result<Option<Difference<'a>>, ExError> {
        let (left_entries, right_entries) = match (&left.shape, &right.shape) {
            (Shape::Map(l), Shape::Map(r)) => (l.clone(), r.clone()),
            _ => return Err(super::unclaimed(self.name(), &left, &right)),
        };

        let mut used = vec![false; right_entries.len()];
        let mut children = Vec::new();

        for (left_key, left_value) in left_entries {
            if self.ignore_defaults && resolve(left_value).1.is_default() {
                continue;
            }

            let segment = PathSegment::Key(render_value(left_key));
            let mut found = None;
            for (j, (right_key, _)) in right_entries.iter().enumerate() {
                if used[j] {
                    continue;
                }
                let same_key = ctx
                    .at(segment.clone(), |ctx| chain.compare(left_key, *right_key, ctx))?
                    .is_none();
                if same_key {
                    found = Some(j);
                    break;
                }
            }

            match found {
                None => children.push(Difference::new(
                    DifferenceKind::MissingMapKey,
                    key_path(ctx, left_key),
                    Some(left_value),
                    None,
                )),
                Some(j) => {
                    used[j] = true;
                    let right_value = right_entries[j].1;
                    if let Some(nested) =
                        ctx.at(segment, |ctx| chain.compare(left_value, right_value, ctx))?
                    {
                        children.push(nested);
                    }
                }
            }
        }

        if !self.ignore_defaults {
            for (j, (right_key, right_value)) in right_entries.iter().enumerate() {
                if !used[j] {
                    children.push(Difference::new(
                        DifferenceKind::UnexpectedMapKey,
                        key_path(ctx, *right_key),
                        None,
                        Some(*right_value),
                    ));
                }
            }
        }

        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            Difference::new(
                DifferenceKind::DifferentMapEntries,
                ctx.current_path(),
                Some(left.value),
                Some(right.value),
            )
            .with_children(children),
        ))
    }
}
