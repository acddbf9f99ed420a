//! Dotted property paths over reflected values.
//!
//! A path such as `"customer.address.city"` walks named object fields and
//! string-keyed map entries. A purely numeric segment indexes into a
//! sequence. Indirections (`Option`, `Box`, ...) are followed transparently.

use super::{resolve, Reflect, Scalar, Shape};
use crate::errors::{CompareError, Result};

/// Navigate `path` starting at `value`.
///
/// # Errors
///
/// `CompareError::PropertyNotFound` when a segment names no field, key or
/// index of the value reached so far (including a null in the middle of
/// the path).
pub fn property_value<'a>(value: &'a dyn Reflect, path: &str) -> Result<&'a dyn Reflect> {
    let mut current = value;
    for segment in path.split('.') {
        current = step(current, segment).ok_or_else(|| CompareError::PropertyNotFound {
            property: path.to_string(),
            segment: segment.to_string(),
        })?;
    }
    Ok(current)
}

/// Navigate `path` on every element of a collection.
///
/// When `value` resolves to a sequence, the property is looked up on each
/// element in order; otherwise the result holds the single property of
/// `value` itself.
pub fn property_values<'a>(value: &'a dyn Reflect, path: &str) -> Result<Vec<&'a dyn Reflect>> {
    match resolve(value).1 {
        Shape::Seq(items) => items
            .into_iter()
            .map(|item| property_value(item, path))
            .collect(),
        _ => Ok(vec![property_value(value, path)?]),
    }
}

fn step<'a>(value: &'a dyn Reflect, segment: &str) -> Option<&'a dyn Reflect> {
    match resolve(value).1 {
        Shape::Object(fields) => fields
            .into_iter()
            .find(|field| field.name == segment)
            .map(|field| field.value),
        Shape::Map(entries) => entries
            .into_iter()
            .find(|(key, _)| {
                matches!(resolve(*key).1, Shape::Scalar(Scalar::Str(k)) if k == segment)
            })
            .map(|(_, v)| v),
        Shape::Seq(items) => {
            let index: usize = segment.parse().ok()?;
            items.into_iter().nth(index)
        }
        _ => None,
    }
}
