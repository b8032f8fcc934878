// Copyright 2025 Cowboy AI, LLC.

//! Per-request expression accumulator
//!
//! Every fluent filter or sort call on a controller handle appends to one of
//! two ordered lists. The terminal search reads both lists once; order is
//! preserved through cloning.

use serde::{Deserialize, Serialize};

use crate::criteria::{Condition, Expression, Sort};

/// Default number of items requested by a search
pub const DEFAULT_SLICE_SIZE: usize = 100;

/// Result window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Offset of the first item
    pub start: usize,
    /// Maximum number of items
    pub size: usize,
}

impl Default for Slice {
    fn default() -> Self {
        Self {
            start: 0,
            size: DEFAULT_SLICE_SIZE,
        }
    }
}

/// Ordered condition and sort lists collected before a terminal search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionAccumulator {
    conditions: Vec<Condition>,
    sortations: Vec<Sort>,
    slice: Slice,
}

impl ExpressionAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expression to the matching list; `None` is ignored
    pub fn add_expression(&mut self, expr: Option<Expression>) -> &mut Self {
        match expr {
            Some(Expression::Condition(condition)) => self.conditions.push(condition),
            Some(Expression::Sort(sort)) => self.sortations.push(sort),
            None => {}
        }
        self
    }

    /// Conditions in insertion order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Sort clauses in insertion order
    pub fn sortations(&self) -> &[Sort] {
        &self.sortations
    }

    /// All conditions combined with logical AND
    pub fn combined(&self) -> Option<Condition> {
        Condition::and(self.conditions.clone())
    }

    /// Requested result window
    pub fn slice(&self) -> Slice {
        self.slice
    }

    /// Replace the result window
    pub fn set_slice(&mut self, start: usize, size: usize) -> &mut Self {
        self.slice = Slice { start, size };
        self
    }

    /// Whether nothing has been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.sortations.is_empty()
    }
}
