// Copyright 2025 Cowboy AI, LLC.

//! Default base controller shared by every controller path

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::{Controller, OuterRef};
use crate::accumulator::ExpressionAccumulator;
use crate::context::Context;
use crate::criteria::{Condition, Expression, Operator};
use crate::errors::{FrontendError, FrontendResult};
use crate::manager::SearchResult;
use crate::sort_keys::{split_keys, SortKey};

/// Operation registered in a controller's method table
pub type Method =
    Arc<dyn Fn(&Context, &mut ExpressionAccumulator, &[Value]) -> FrontendResult<Value> + Send + Sync>;

/// Base controller: accumulates expressions and searches via the path's manager
pub struct StandardController {
    path: String,
    name: String,
    outer: OuterRef,
    methods: IndexMap<String, Method>,
}

impl StandardController {
    /// Create the `Standard` implementation for `path`
    pub fn new(path: impl Into<String>, outer: OuterRef) -> Self {
        Self::named(path, "Standard", outer)
    }

    /// Create a base controller registered under another implementation name
    pub fn named(path: impl Into<String>, name: impl Into<String>, outer: OuterRef) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            outer,
            methods: IndexMap::new(),
        }
    }

    /// Register an operation reachable through [`Controller::call`]
    pub fn with_method<F>(mut self, operation: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Context, &mut ExpressionAccumulator, &[Value]) -> FrontendResult<Value>
            + Send
            + Sync
            + 'static,
    {
        self.methods.insert(operation.into(), Arc::new(method));
        self
    }

    /// Controller path served
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Registered operation names
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Qualify bare field names with the path's key prefix
    fn sort_key(&self, key: &SortKey) -> String {
        if key.is_function() || key.name.contains(['.', ':']) {
            key.name.clone()
        } else {
            format!("{}.{}", self.path.replace('/', "."), key.name)
        }
    }
}

impl Controller for StandardController {
    fn name(&self) -> &str {
        &self.name
    }

    fn inner(&self) -> Option<&Arc<dyn Controller>> {
        None
    }

    fn interface(&self) -> &str {
        &self.path
    }

    fn outer(&self) -> Option<Arc<dyn Controller>> {
        self.outer.get()
    }

    fn add_expression(
        &self,
        state: &mut ExpressionAccumulator,
        expr: Option<Expression>,
    ) -> FrontendResult<()> {
        state.add_expression(expr);
        Ok(())
    }

    fn compare(&self, operator: Operator, key: &str, value: Value) -> FrontendResult<Condition> {
        Ok(Condition::compare(operator, key, value))
    }

    fn sort(&self, state: &mut ExpressionAccumulator, keys: Option<&str>) -> FrontendResult<()> {
        // sort clauses pass through the whole stack so decorators see them
        let outer = self.outer.get();

        for token in split_keys(keys) {
            let key = SortKey::parse(&token);
            let sort = key.to_sort(self.sort_key(&key));

            match &outer {
                Some(outer) => outer.add_expression(state, Some(sort.into()))?,
                None => self.add_expression(state, Some(sort.into()))?,
            }
        }
        Ok(())
    }

    fn slice(&self, state: &mut ExpressionAccumulator, start: usize, size: usize) -> FrontendResult<()> {
        state.set_slice(start, size);
        Ok(())
    }

    fn search(&self, ctx: &Context, state: &ExpressionAccumulator) -> FrontendResult<SearchResult> {
        let manager = ctx.manager(&self.path)?;

        let mut filter = manager.filter();
        filter
            .merge(state.combined())
            .sort(state.sortations().iter().cloned());
        filter.slice = state.slice();
        filter.locale = ctx.locale().map(str::to_string);

        debug!(
            path = %self.path,
            conditions = state.conditions().len(),
            sortations = state.sortations().len(),
            locale = ?filter.locale,
            "Searching"
        );

        manager.search(&filter)
    }

    fn call(
        &self,
        ctx: &Context,
        state: &mut ExpressionAccumulator,
        operation: &str,
        args: &[Value],
    ) -> FrontendResult<Value> {
        let method = self
            .methods
            .get(operation)
            .ok_or_else(|| FrontendError::no_such_operation(operation, &self.name))?;
        (**method)(ctx, state, args)
    }
}

impl fmt::Debug for StandardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardController")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
