//! Structural view of values handed to the comparison engine.
//!
//! Every compared value implements [`Reflect`], which exposes its
//! [`Shape`]: a scalar, an enum constant, a date/time, a sequence, a map,
//! an object with named fields, a transparent indirection, null, or an
//! opaque value the engine must not look into.
//!
//! Shapes borrow from the value they describe, so a comparison never copies
//! the compared graphs. Identity (for the "same reference" shortcut and the
//! cycle tracker) is the value's address paired with its type name.
//!
//! User types register their fields with [`reflect_object!`](crate::reflect_object)
//! and unit-only enums with [`reflect_enum!`](crate::reflect_enum).

mod impls;
pub mod macros;
pub mod property;
pub mod render;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use property::{property_value, property_values};
pub use render::render_value;

/// A value whose structure the comparison engine can walk.
pub trait Reflect {
    /// Describe this value's structure.
    fn shape(&self) -> Shape<'_>;

    /// Name of the concrete type, used for identity and type checks.
    ///
    /// Smart pointers report the name of their pointee.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Address used for identity. Smart pointers report their pointee's.
    fn identity_addr(&self) -> *const () {
        self as *const Self as *const ()
    }

    /// Extent used for identity alongside the address.
    ///
    /// Two prefixes of one buffer share an address; the extent keeps
    /// them apart. Unsized sequences report their element count.
    fn identity_len(&self) -> usize {
        std::mem::size_of_val(self)
    }
}

/// The structure of a value as seen by the engine.
pub enum Shape<'a> {
    /// No value (`None`, JSON `null`, SQL `NULL`)
    Null,
    /// Transparent wrapper; the engine continues with the inner value
    Indirect(&'a dyn Reflect),
    Scalar(Scalar<'a>),
    Enum(EnumConstant),
    Temporal(Temporal),
    Seq(Vec<&'a dyn Reflect>),
    Map(Vec<(&'a dyn Reflect, &'a dyn Reflect)>),
    Object(Vec<Field<'a>>),
    /// A value with no comparable structure (handles, closures, ...)
    Opaque,
}

impl Shape<'_> {
    /// Short label used in messages and errors.
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Indirect(_) => "indirect",
            Shape::Scalar(_) => "scalar",
            Shape::Enum(_) => "enum",
            Shape::Temporal(_) => "temporal",
            Shape::Seq(_) => "sequence",
            Shape::Map(_) => "map",
            Shape::Object(_) => "object",
            Shape::Opaque => "opaque",
        }
    }

    /// Leaf values: scalars, enum constants and date/time values.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Shape::Scalar(_) | Shape::Enum(_) | Shape::Temporal(_))
    }

    /// Aggregates: sequences, maps and objects.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Shape::Seq(_) | Shape::Map(_) | Shape::Object(_))
    }

    /// Whether this value equals its type's zero/default value.
    ///
    /// Objects, enum constants and date/time values are never defaults.
    pub fn is_default(&self) -> bool {
        match self {
            Shape::Null => true,
            Shape::Scalar(scalar) => scalar.is_default(),
            Shape::Seq(items) => items.is_empty(),
            Shape::Map(entries) => entries.is_empty(),
            Shape::Indirect(inner) => resolve(*inner).1.is_default(),
            Shape::Enum(_) | Shape::Temporal(_) | Shape::Object(_) | Shape::Opaque => false,
        }
    }
}

/// A named field of an object.
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: &'a dyn Reflect) -> Self {
        Self { name, value }
    }
}

/// Built-in scalar values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Char(char),
    Number(Number),
    Str(&'a str),
    Bytes(&'a [u8]),
}

impl Scalar<'_> {
    pub fn is_default(&self) -> bool {
        match self {
            Scalar::Bool(b) => !b,
            Scalar::Char(c) => *c == '\0',
            Scalar::Number(n) => n.is_zero(),
            Scalar::Str(s) => s.is_empty(),
            Scalar::Bytes(b) => b.is_empty(),
        }
    }
}

/// Concrete width/precision of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

/// Numeric payload in its widest lossless container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Signed(i128),
    Unsigned(u128),
    Float(f64),
}

/// A number together with its concrete kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub kind: NumberKind,
    pub value: NumberValue,
}

impl Number {
    pub fn signed(kind: NumberKind, value: i128) -> Self {
        Self {
            kind,
            value: NumberValue::Signed(value),
        }
    }

    pub fn unsigned(kind: NumberKind, value: u128) -> Self {
        Self {
            kind,
            value: NumberValue::Unsigned(value),
        }
    }

    pub fn float(kind: NumberKind, value: f64) -> Self {
        Self {
            kind,
            value: NumberValue::Float(value),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self.value {
            NumberValue::Signed(v) => v == 0,
            NumberValue::Unsigned(v) => v == 0,
            NumberValue::Float(v) => v == 0.0,
        }
    }

    /// Lossy conversion into the common wide representation.
    pub fn as_f64(&self) -> f64 {
        match self.value {
            NumberValue::Signed(v) => v as f64,
            NumberValue::Unsigned(v) => v as f64,
            NumberValue::Float(v) => v,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            NumberValue::Signed(v) => write!(f, "{}", v),
            NumberValue::Unsigned(v) => write!(f, "{}", v),
            NumberValue::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// A constant of a unit-only enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumConstant {
    pub type_name: &'static str,
    pub variant: &'static str,
}

/// Concrete representation of a date/time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalKind {
    Utc,
    FixedOffset,
    Local,
    NaiveDateTime,
    NaiveDate,
    SystemTime,
}

/// A date/time value reduced to the instant it represents.
///
/// Naive values are interpreted as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temporal {
    pub kind: TemporalKind,
    pub instant: DateTime<Utc>,
}

/// Follow indirections until a concrete shape is reached.
///
/// Returns the innermost value together with its shape; identity checks
/// use the returned value, not the wrapper.
pub fn resolve<'a>(value: &'a dyn Reflect) -> (&'a dyn Reflect, Shape<'a>) {
    let mut current = value;
    loop {
        match current.shape() {
            Shape::Indirect(inner) => current = inner,
            shape => return (current, shape),
        }
    }
}

/// Identity of a value: its address and extent paired with its concrete
/// type name.
///
/// The type name keeps a struct and its first field (which share an
/// address) apart; the extent does the same for slice prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    len: usize,
    type_name: &'static str,
}

impl Identity {
    pub fn of(value: &dyn Reflect) -> Self {
        Self {
            addr: value.identity_addr() as usize,
            len: value.identity_len(),
            type_name: value.type_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_resolve_follows_indirections() {
        let value: Option<Box<Rc<i32>>> = Some(Box::new(Rc::new(7)));
        let (inner, shape) = resolve(&value);
        assert_eq!(inner.type_name(), "i32");
        assert!(matches!(
            shape,
            Shape::Scalar(Scalar::Number(Number {
                kind: NumberKind::I32,
                ..
            }))
        ));
    }

    #[test]
    fn test_smart_pointer_identity_is_pointee_identity() {
        let shared = Rc::new(String::from("shared"));
        let alias = Rc::clone(&shared);
        assert_eq!(Identity::of(&shared), Identity::of(&alias));
        assert_eq!(Identity::of(&shared), Identity::of(&*shared));
    }

    #[test]
    fn test_defaults() {
        assert!(0_u8.shape().is_default());
        assert!(String::new().shape().is_default());
        assert!(Option::<i32>::None.shape().is_default());
        assert!(Vec::<i32>::new().shape().is_default());
        assert!(!1.5_f64.shape().is_default());
        assert!(!"x".shape().is_default());
        assert!(!true.shape().is_default());
    }

    #[test]
    fn test_identity_distinguishes_types_at_same_address() {
        struct Outer {
            inner: u32,
        }
        impl Reflect for Outer {
            fn shape(&self) -> Shape<'_> {
                Shape::Object(vec![Field::new("inner", &self.inner)])
            }
        }

        let outer = Outer { inner: 1 };
        assert_ne!(Identity::of(&outer), Identity::of(&outer.inner));
        assert_eq!(Identity::of(&outer), Identity::of(&outer));
    }

    #[test]
    fn test_identity_distinguishes_prefixes_of_one_buffer() {
        let text = String::from("abcdef");
        let numbers = vec![1, 2, 3];
        let (short, long): (&str, &str) = (&text[..1], &text[..4]);
        let (head, all): (&[i32], &[i32]) = (&numbers[..1], &numbers[..3]);

        assert_ne!(Identity::of(&short), Identity::of(&long));
        assert_ne!(Identity::of(&head), Identity::of(&all));
        assert_eq!(Identity::of(&long), Identity::of(&&text[..4]));
    }
}
