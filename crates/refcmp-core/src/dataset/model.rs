//! Rows and typed cells handed to the row matcher.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::reflect::{Number, NumberKind, Reflect, Scalar, Shape, Temporal, TemporalKind};

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datum {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Bytes(Vec<u8>),
}

impl Datum {
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }
}

impl Reflect for Datum {
    fn shape(&self) -> Shape<'_> {
        match self {
            Datum::Null => Shape::Null,
            Datum::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Datum::Int(i) => {
                Shape::Scalar(Scalar::Number(Number::signed(NumberKind::I64, i128::from(*i))))
            }
            Datum::Float(f) => Shape::Scalar(Scalar::Number(Number::float(NumberKind::F64, *f))),
            Datum::Text(s) => Shape::Scalar(Scalar::Str(s)),
            Datum::Timestamp(t) => Shape::Temporal(Temporal {
                kind: TemporalKind::Utc,
                instant: *t,
            }),
            Datum::Date(d) => d.shape(),
            Datum::Bytes(b) => Shape::Scalar(Scalar::Bytes(b)),
        }
    }
}

macro_rules! datum_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Datum {
                fn from(value: $t) -> Self {
                    Datum::$variant(value.into())
                }
            }
        )*
    };
}

datum_from!(
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Text,
    &str => Text,
    DateTime<Utc> => Timestamp,
    NaiveDate => Date,
    Vec<u8> => Bytes,
);

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Datum::Null)
    }
}

/// A table name, optionally qualified by its schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifiedTable {
    pub schema: Option<String>,
    pub table: String,
}

impl QualifiedTable {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            table: table.into(),
        }
    }

    pub fn unqualified(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
        }
    }

    /// Parse `schema.table` or a bare `table`.
    pub fn parse(name: &str) -> Self {
        match name.split_once('.') {
            Some((schema, table)) => Self::new(schema, table),
            None => Self::unqualified(name),
        }
    }
}

impl std::fmt::Display for QualifiedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

/// One cell of a row.
///
/// Ignored cells take no part in matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub column: String,
    pub value: Datum,
    #[serde(default)]
    pub ignored: bool,
}

impl ColumnValue {
    pub fn new(column: impl Into<String>, value: impl Into<Datum>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            ignored: false,
        }
    }

    pub fn ignored(column: impl Into<String>, value: impl Into<Datum>) -> Self {
        Self {
            ignored: true,
            ..Self::new(column, value)
        }
    }
}

/// A row of a table, expected or actual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Only used to report which actual row was matched
    pub identifier: Option<String>,
    pub table: QualifiedTable,
    pub values: Vec<ColumnValue>,
}

impl Row {
    pub fn new(table: QualifiedTable) -> Self {
        Self {
            identifier: None,
            table,
            values: Vec::new(),
        }
    }

    /// Expected row asserting that the table holds no further rows.
    pub fn no_more_records(table: QualifiedTable) -> Self {
        Self::new(table)
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_value(mut self, column: impl Into<String>, value: impl Into<Datum>) -> Self {
        self.values.push(ColumnValue::new(column, value));
        self
    }

    pub fn with_ignored_value(mut self, column: impl Into<String>, value: impl Into<Datum>) -> Self {
        self.values.push(ColumnValue::ignored(column, value));
        self
    }

    pub fn push(&mut self, value: ColumnValue) {
        self.values.push(value);
    }

    /// True for a row without any non-ignored value: the "no more records"
    /// marker.
    pub fn is_empty_marker(&self) -> bool {
        self.values.iter().all(|v| v.ignored)
    }

    /// Look up a column by name.
    pub fn value(&self, column: &str, case_sensitive: bool) -> Option<&ColumnValue> {
        self.values.iter().find(|v| {
            if case_sensitive {
                v.column == column
            } else {
                v.column.eq_ignore_ascii_case(column)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_table_parse_and_display() {
        let t = QualifiedTable::parse("sales.orders");
        assert_eq!(t, QualifiedTable::new("sales", "orders"));
        assert_eq!(t.to_string(), "sales.orders");
        assert_eq!(QualifiedTable::parse("orders").to_string(), "orders");
    }

    #[test]
    fn test_empty_marker() {
        let table = QualifiedTable::new("s", "t");
        assert!(Row::no_more_records(table.clone()).is_empty_marker());
        assert!(Row::new(table.clone())
            .with_ignored_value("id", 1)
            .is_empty_marker());
        assert!(!Row::new(table).with_value("id", 1).is_empty_marker());
    }

    #[test]
    fn test_value_lookup_case() {
        let row = Row::new(QualifiedTable::unqualified("t")).with_value("Name", "x");
        assert!(row.value("NAME", false).is_some());
        assert!(row.value("NAME", true).is_none());
        assert!(row.value("Name", true).is_some());
    }

    #[test]
    fn test_datum_conversions() {
        assert_eq!(Datum::from(11), Datum::Int(11));
        assert_eq!(Datum::from(Option::<i32>::None), Datum::Null);
        assert_eq!(Datum::from("x"), Datum::Text("x".to_string()));
        assert!(Datum::Null.is_null());
    }

    #[test]
    fn test_datum_serde_shape() {
        let json = serde_json::to_string(&Datum::Int(5)).unwrap();
        assert_eq!(json, r#"{"int":5}"#);
        let back: Datum = serde_json::from_str(r#""null""#).unwrap();
        assert_eq!(back, Datum::Null);
    }
}
