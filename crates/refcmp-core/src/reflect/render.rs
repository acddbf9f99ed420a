//! Compact text rendering of reflected values for messages and reports.

use std::collections::HashSet;
use std::fmt::Write as _;

use super::{resolve, Identity, Reflect, Scalar, Shape, TemporalKind};

/// Nesting depth beyond which aggregates render as `...`
const MAX_DEPTH: usize = 6;
/// Elements/entries/fields shown per aggregate before truncating
const MAX_ITEMS: usize = 16;

/// Render `value` as a single line of text.
///
/// Strings are quoted, objects are prefixed with their short type name,
/// and a value reached again through a cycle renders as `<cycle>`.
pub fn render_value(value: &dyn Reflect) -> String {
    let mut out = String::new();
    let mut stack = HashSet::new();
    render_into(&mut out, value, 0, &mut stack);
    out
}

fn render_into(out: &mut String, value: &dyn Reflect, depth: usize, stack: &mut HashSet<Identity>) {
    let (value, shape) = resolve(value);
    let aggregate = shape.is_aggregate();
    if aggregate && depth >= MAX_DEPTH {
        out.push_str("...");
        return;
    }

    let identity = Identity::of(value);
    if aggregate && !stack.insert(identity) {
        out.push_str("<cycle>");
        return;
    }

    match shape {
        Shape::Null | Shape::Indirect(_) => out.push_str("null"),
        Shape::Scalar(scalar) => render_scalar(out, scalar),
        Shape::Enum(constant) => out.push_str(constant.variant),
        Shape::Temporal(t) => match t.kind {
            TemporalKind::NaiveDate => {
                let _ = write!(out, "{}", t.instant.date_naive());
            }
            _ => out.push_str(&t.instant.to_rfc3339()),
        },
        Shape::Seq(items) => {
            out.push('[');
            render_list(out, items.len(), |out, i| {
                render_into(out, items[i], depth + 1, stack)
            });
            out.push(']');
        }
        Shape::Map(entries) => {
            out.push('{');
            render_list(out, entries.len(), |out, i| {
                let (k, v) = entries[i];
                render_into(out, k, depth + 1, stack);
                out.push_str(": ");
                render_into(out, v, depth + 1, stack);
            });
            out.push('}');
        }
        Shape::Object(fields) => {
            out.push_str(short_type_name(value.type_name()));
            out.push_str(" { ");
            render_list(out, fields.len(), |out, i| {
                out.push_str(fields[i].name);
                out.push_str(": ");
                render_into(out, fields[i].value, depth + 1, stack);
            });
            out.push_str(" }");
        }
        Shape::Opaque => {
            let _ = write!(out, "<opaque {}>", short_type_name(value.type_name()));
        }
    }

    if aggregate {
        stack.remove(&identity);
    }
}

fn render_list(out: &mut String, len: usize, mut item: impl FnMut(&mut String, usize)) {
    for i in 0..len.min(MAX_ITEMS) {
        if i > 0 {
            out.push_str(", ");
        }
        item(out, i);
    }
    if len > MAX_ITEMS {
        let _ = write!(out, ", ... ({} more)", len - MAX_ITEMS);
    }
}

fn render_scalar(out: &mut String, scalar: Scalar<'_>) {
    match scalar {
        Scalar::Bool(b) => {
            let _ = write!(out, "{}", b);
        }
        Scalar::Char(c) => {
            let _ = write!(out, "{:?}", c);
        }
        Scalar::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::Str(s) => {
            let _ = write!(out, "{:?}", s);
        }
        Scalar::Bytes(bytes) => {
            out.push_str("0x");
            for b in bytes {
                let _ = write!(out, "{:02x}", b);
            }
        }
    }
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name(full: &str) -> &str {
    let outer = full.split('<').next().unwrap_or(full);
    outer.rsplit("::").next().unwrap_or(outer)
}
