// Copyright 2025 Cowboy AI, LLC.

//! Seam to the external domain managers executing searches

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::criteria::Filter;
use crate::errors::FrontendResult;

/// Items returned by a search plus the total before slicing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matching items in sort order
    pub items: Vec<Value>,
    /// Total number of matches, if the manager counted them
    pub total: Option<usize>,
}

impl SearchResult {
    /// Create a result
    pub fn new(items: Vec<Value>, total: Option<usize>) -> Self {
        Self { items, total }
    }

    /// Whether more matches exist beyond the returned items
    pub fn has_more(&self) -> bool {
        self.total.is_some_and(|total| self.items.len() < total)
    }
}

/// Persistence/search backend of one domain
pub trait Manager: Send + Sync {
    /// Fresh filter carrying the manager's base predicate
    fn filter(&self) -> Filter;

    /// Execute a filter
    fn search(&self, filter: &Filter) -> FrontendResult<SearchResult>;
}
