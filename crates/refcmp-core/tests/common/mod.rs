use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use refcmp_core::dataset::{QualifiedTable, Row};
use refcmp_core::{reflect_enum, reflect_object};

#[derive(Debug, Clone, Default)]
#[allow(dead_code)]
pub struct Address {
    pub street: String,
    pub number: u32,
    pub city: String,
}

reflect_object!(Address {
    street,
    number,
    city
});

#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(dead_code)]
pub enum Status {
    Active,
    Suspended,
}

reflect_enum!(Status { Active, Suspended });

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub status: Status,
    pub address: Address,
    pub tags: Vec<String>,
    pub attributes: BTreeMap<String, i32>,
}

reflect_object!(Customer {
    id,
    name,
    email,
    status,
    address,
    tags,
    attributes
});

/// Same field layout as [`Address`] under another type name
#[derive(Debug, Clone, Default)]
#[allow(dead_code)]
pub struct Location {
    pub street: String,
    pub number: u32,
    pub city: String,
}

reflect_object!(Location {
    street,
    number,
    city
});

/// Singly linked node; cycles are built through the `OnceCell`.
#[allow(dead_code)]
pub struct Node {
    pub name: String,
    pub next: OnceCell<Rc<Node>>,
}

reflect_object!(Node { name, next });

/// A value the engine cannot look into.
#[allow(dead_code)]
pub struct Handle(pub u64);

impl refcmp_core::Reflect for Handle {
    fn shape(&self) -> refcmp_core::reflect::Shape<'_> {
        refcmp_core::reflect::Shape::Opaque
    }
}

/// A fully populated customer
#[allow(dead_code)]
pub fn customer() -> Customer {
    Customer {
        id: 42,
        name: "Ann".to_string(),
        email: Some("ann@example.org".to_string()),
        status: Status::Active,
        address: Address {
            street: "Main Street".to_string(),
            number: 7,
            city: "Ghent".to_string(),
        },
        tags: vec!["gold".to_string(), "early".to_string()],
        attributes: BTreeMap::from([("age".to_string(), 31), ("visits".to_string(), 4)]),
    }
}

/// Two nodes pointing at each other: `first -> second -> first`
#[allow(dead_code)]
pub fn ring(first: &str, second: &str) -> Rc<Node> {
    let a = Rc::new(Node {
        name: first.to_string(),
        next: OnceCell::new(),
    });
    let b = Rc::new(Node {
        name: second.to_string(),
        next: OnceCell::new(),
    });
    let _ = b.next.set(a.clone());
    let _ = a.next.set(b);
    a
}

/// The table used by the data set scenarios
#[allow(dead_code)]
pub fn test_table() -> QualifiedTable {
    QualifiedTable::new("schema", "table")
}

/// Actual row `id` with values `base + 1`, `base + 2`, `base + 3` in
/// `column1..column3`
#[allow(dead_code)]
pub fn actual_row(id: &str, base: i64) -> Row {
    Row::new(test_table())
        .with_identifier(id)
        .with_value("column1", base + 1)
        .with_value("column2", base + 2)
        .with_value("column3", base + 3)
}

/// The three actual rows: 11/12/13, 21/22/23, 31/32/33
#[allow(dead_code)]
pub fn actual_rows() -> Vec<Row> {
    vec![
        actual_row("1", 10),
        actual_row("2", 20),
        actual_row("3", 30),
    ]
}

/// Expected row over `column1..column3` with the given values
#[allow(dead_code)]
pub fn expected_row(values: [i64; 3]) -> Row {
    Row::new(test_table())
        .with_value("column1", values[0])
        .with_value("column2", values[1])
        .with_value("column3", values[2])
}
