//! Per-call comparison state: the path stack and the cycle tracker.

use std::collections::HashSet;

use super::difference::{render_path, PathSegment};
use crate::reflect::{Identity, Reflect};

/// Identities of a left/right pair being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisitedPair {
    left: Identity,
    right: Identity,
}

impl VisitedPair {
    pub fn of(left: &dyn Reflect, right: &dyn Reflect) -> Self {
        Self {
            left: Identity::of(left),
            right: Identity::of(right),
        }
    }
}

/// State threaded through one comparison.
///
/// Created fresh for every top-level call; both the path stack and the
/// visited set are empty again once the call returns.
#[derive(Debug, Default)]
pub struct CompareContext {
    path: Vec<PathSegment>,
    visited: HashSet<VisitedPair>,
}

impl CompareContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Snapshot of the current path for a new `Difference`.
    pub fn current_path(&self) -> Vec<PathSegment> {
        self.path.clone()
    }

    pub fn path_string(&self) -> String {
        render_path(&self.path)
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.path.push(segment);
    }

    pub fn pop(&mut self) {
        self.path.pop();
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Run `f` with `segment` pushed onto the path.
    pub fn at<T>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> T) -> T {
        self.push(segment);
        let result = f(self);
        self.pop();
        result
    }

    pub fn is_in_progress(&self, pair: &VisitedPair) -> bool {
        self.visited.contains(pair)
    }

    /// Mark `pair` as in progress. Returns `false` if it already was.
    pub fn enter(&mut self, pair: VisitedPair) -> bool {
        self.visited.insert(pair)
    }

    pub fn leave(&mut self, pair: &VisitedPair) {
        self.visited.remove(pair);
    }

    /// True when nothing is pushed and nothing is in progress.
    pub fn is_unwound(&self) -> bool {
        self.path.is_empty() && self.visited.is_empty()
    }
}
