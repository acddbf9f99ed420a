//! Difference model produced by the comparator chain.
//!
//! A [`Difference`] borrows the two sub-values that disagree; call
//! [`Difference::to_report`] for an owned, serializable copy.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::reflect::{render_value, Reflect};

/// One step on the way from the compared roots to a mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegment {
    Field(String),
    Index(usize),
    /// A map key, already rendered with [`render_value`]
    Key(String),
}

/// Render a path as `a.b[2]["k"]`.
pub fn render_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathSegment::Index(i) => {
                let _ = write!(out, "[{}]", i);
            }
            PathSegment::Key(key) => {
                let _ = write!(out, "[{}]", key);
            }
        }
    }
    out
}

/// Classification of a mismatch; each kind has a stable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    LeftNull,
    RightNull,
    DifferentValues,
    DifferentTypes,
    CollectionSizesDiffer,
    DifferentElements,
    NoMatchForElement,
    UnexpectedElement,
    MissingMapKey,
    UnexpectedMapKey,
    DifferentMapEntries,
    MissingField,
    DifferentFieldValues,
}

impl DifferenceKind {
    pub fn message(&self) -> &'static str {
        match self {
            DifferenceKind::LeftNull => "left value null",
            DifferenceKind::RightNull => "right value null",
            DifferenceKind::DifferentValues => "different object values",
            DifferenceKind::DifferentTypes => "different types",
            DifferenceKind::CollectionSizesDiffer => "collection sizes differ",
            DifferenceKind::DifferentElements => "different collection elements",
            DifferenceKind::NoMatchForElement => "no match found for element",
            DifferenceKind::UnexpectedElement => "unexpected element",
            DifferenceKind::MissingMapKey => "missing map key",
            DifferenceKind::UnexpectedMapKey => "unexpected map key",
            DifferenceKind::DifferentMapEntries => "different map entries",
            DifferenceKind::MissingField => "missing field",
            DifferenceKind::DifferentFieldValues => "different field values",
        }
    }
}

/// A mismatch between two values, with nested mismatches for aggregates.
///
/// `left`/`right` are `None` when that side has no value at the path (a
/// missing map key or field, an orphaned collection element).
pub struct Difference<'a> {
    pub path: Vec<PathSegment>,
    pub left: Option<&'a dyn Reflect>,
    pub right: Option<&'a dyn Reflect>,
    pub kind: DifferenceKind,
    pub message: String,
    pub children: Vec<Difference<'a>>,
}

impl<'a> Difference<'a> {
    pub fn new(
        kind: DifferenceKind,
        path: Vec<PathSegment>,
        left: Option<&'a dyn Reflect>,
        right: Option<&'a dyn Reflect>,
    ) -> Self {
        Self {
            path,
            left,
            right,
            kind,
            message: kind.message().to_string(),
            children: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Difference<'a>>) -> Self {
        self.children = children;
        self
    }

    pub fn path_string(&self) -> String {
        render_path(&self.path)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The innermost mismatches, depth-first.
    pub fn leaves(&self) -> Vec<&Difference<'a>> {
        if self.children.is_empty() {
            return vec![self];
        }
        self.children.iter().flat_map(|c| c.leaves()).collect()
    }

    /// Owned, serializable copy with both sides rendered as text.
    pub fn to_report(&self) -> DifferenceReport {
        DifferenceReport {
            path: self.path_string(),
            kind: self.kind,
            message: self.message.clone(),
            left: self.left.map(render_value),
            right: self.right.map(render_value),
            children: self.children.iter().map(Difference::to_report).collect(),
        }
    }
}

impl std::fmt::Debug for Difference<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Difference")
            .field("path", &self.path_string())
            .field("kind", &self.kind)
            .field("left", &self.left.map(render_value))
            .field("right", &self.right.map(render_value))
            .field("children", &self.children)
            .finish()
    }
}

impl std::fmt::Display for Difference<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::report::render_difference(&self.to_report()))
    }
}

/// Owned form of a [`Difference`] for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceReport {
    /// Rendered path; empty at the root
    pub path: String,
    pub kind: DifferenceKind,
    pub message: String,
    pub left: Option<String>,
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DifferenceReport>,
}

impl DifferenceReport {
    /// Number of leaf mismatches in this tree.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(DifferenceReport::leaf_count).sum()
        }
    }
}
