//! `Reflect` implementations for std, chrono and serde_json types.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};

use super::{Number, NumberKind, Reflect, Scalar, Shape, Temporal, TemporalKind};

macro_rules! reflect_signed {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $t {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::Number(Number::signed(NumberKind::$kind, *self as i128)))
                }
            }
        )*
    };
}

macro_rules! reflect_unsigned {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $t {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::Number(Number::unsigned(NumberKind::$kind, *self as u128)))
                }
            }
        )*
    };
}

reflect_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize);
reflect_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize);

impl Reflect for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Number(Number::float(NumberKind::F32, f64::from(*self))))
    }
}

impl Reflect for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Number(Number::float(NumberKind::F64, *self)))
    }
}

impl Reflect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }
}

impl Reflect for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Char(*self))
    }
}

impl Reflect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Pointers: fully transparent, including identity
// ---------------------------------------------------------------------------

macro_rules! reflect_pointer {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn identity_addr(&self) -> *const () {
                    (**self).identity_addr()
                }

                fn identity_len(&self) -> usize {
                    (**self).identity_len()
                }
            }
        )*
    };
}

reflect_pointer!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn identity_addr(&self) -> *const () {
        (**self).identity_addr()
    }

    fn identity_len(&self) -> usize {
        (**self).identity_len()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn identity_addr(&self) -> *const () {
        (**self).identity_addr()
    }

    fn identity_len(&self) -> usize {
        (**self).identity_len()
    }
}

// ---------------------------------------------------------------------------
// Optional values
// ---------------------------------------------------------------------------

impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => Shape::Indirect(value),
            None => Shape::Null,
        }
    }
}

impl<T: Reflect> Reflect for OnceCell<T> {
    fn shape(&self) -> Shape<'_> {
        match self.get() {
            Some(value) => Shape::Indirect(value),
            None => Shape::Null,
        }
    }
}

impl<T: Reflect> Reflect for OnceLock<T> {
    fn shape(&self) -> Shape<'_> {
        match self.get() {
            Some(value) => Shape::Indirect(value),
            None => Shape::Null,
        }
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

fn seq<'a, T: Reflect + 'a>(items: impl Iterator<Item = &'a T>) -> Shape<'a> {
    Shape::Seq(items.map(|item| item as &dyn Reflect).collect())
}

impl<T: Reflect> Reflect for [T] {
    fn shape(&self) -> Shape<'_> {
        seq(self.iter())
    }

    fn identity_len(&self) -> usize {
        self.len()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        seq(self.iter())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        seq(self.iter())
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        seq(self.iter())
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        seq(self.iter())
    }
}

/// Hash sets are exposed in sorted order so comparisons stay deterministic.
impl<T: Reflect + Ord, S> Reflect for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        let mut items: Vec<&T> = self.iter().collect();
        items.sort();
        seq(items.into_iter())
    }
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                .collect(),
        )
    }
}

/// Hash maps are exposed sorted by key so comparisons stay deterministic.
impl<K: Reflect + Ord, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        let mut entries: Vec<(&K, &V)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Shape::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Date/time values
// ---------------------------------------------------------------------------

fn temporal(kind: TemporalKind, instant: DateTime<Utc>) -> Shape<'static> {
    Shape::Temporal(Temporal { kind, instant })
}

impl Reflect for DateTime<Utc> {
    fn shape(&self) -> Shape<'_> {
        temporal(TemporalKind::Utc, *self)
    }
}

impl Reflect for DateTime<FixedOffset> {
    fn shape(&self) -> Shape<'_> {
        temporal(TemporalKind::FixedOffset, self.with_timezone(&Utc))
    }
}

impl Reflect for DateTime<Local> {
    fn shape(&self) -> Shape<'_> {
        temporal(TemporalKind::Local, self.with_timezone(&Utc))
    }
}

impl Reflect for NaiveDateTime {
    fn shape(&self) -> Shape<'_> {
        temporal(TemporalKind::NaiveDateTime, self.and_utc())
    }
}

impl Reflect for NaiveDate {
    fn shape(&self) -> Shape<'_> {
        match self.and_hms_opt(0, 0, 0) {
            Some(midnight) => temporal(TemporalKind::NaiveDate, midnight.and_utc()),
            None => Shape::Opaque,
        }
    }
}

impl Reflect for SystemTime {
    fn shape(&self) -> Shape<'_> {
        temporal(TemporalKind::SystemTime, DateTime::<Utc>::from(*self))
    }
}

// ---------------------------------------------------------------------------
// JSON documents
// ---------------------------------------------------------------------------

impl Reflect for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_json::Value;
        match self {
            Value::Null => Shape::Null,
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => {
                let number = if let Some(i) = n.as_i64() {
                    Number::signed(NumberKind::I64, i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Number::unsigned(NumberKind::U64, u128::from(u))
                } else {
                    Number::float(NumberKind::F64, n.as_f64().unwrap_or(f64::NAN))
                };
                Shape::Scalar(Scalar::Number(number))
            }
            Value::String(s) => Shape::Scalar(Scalar::Str(s)),
            Value::Array(items) => seq(items.iter()),
            Value::Object(map) => Shape::Map(
                map.iter()
                    .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                    .collect(),
            ),
        }
    }
}
