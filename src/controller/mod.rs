// Copyright 2025 Cowboy AI, LLC.

//! Controller capability set
//!
//! A controller is a stack of layers: one base implementation wrapped by any
//! number of decorators. Every layer implements [`Controller`]; operations a
//! decorator does not override are forwarded to its inner layer by the default
//! method bodies. A layer without an inner controller that does not override
//! an operation ends the chain with [`FrontendError::NoSuchOperation`].
//!
//! Layers are immutable once built and shared between requests. Request state
//! lives in the [`ExpressionAccumulator`] owned by a [`ControllerHandle`].

mod handle;
mod standard;

use std::fmt;
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::accumulator::ExpressionAccumulator;
use crate::context::Context;
use crate::criteria::{Condition, Expression, Operator};
use crate::errors::{FrontendError, FrontendResult};
use crate::manager::SearchResult;

pub use handle::ControllerHandle;
pub use standard::{Method, StandardController};

/// One layer of a composed frontend controller
pub trait Controller: Send + Sync {
    /// Layer name: the implementation name of a base controller or a decorator name
    fn name(&self) -> &str;

    /// Wrapped layer, `None` for base controllers
    fn inner(&self) -> Option<&Arc<dyn Controller>>;

    /// Capability interface this layer provides, the controller path it serves
    fn interface(&self) -> &str {
        self.inner().map(|inner| inner.interface()).unwrap_or("")
    }

    /// Outermost layer of the stack this layer belongs to
    fn outer(&self) -> Option<Arc<dyn Controller>> {
        None
    }

    /// Inner layer that receives a forwarded operation
    fn delegate(&self, operation: &str) -> FrontendResult<&dyn Controller> {
        self.inner()
            .map(|inner| &**inner)
            .ok_or_else(|| FrontendError::no_such_operation(operation, self.name()))
    }

    /// Append an expression to the request state
    fn add_expression(
        &self,
        state: &mut ExpressionAccumulator,
        expr: Option<Expression>,
    ) -> FrontendResult<()> {
        self.delegate("addExpression")?.add_expression(state, expr)
    }

    /// Build a comparison condition without adding it
    fn compare(&self, operator: Operator, key: &str, value: Value) -> FrontendResult<Condition> {
        self.delegate("compare")?.compare(operator, key, value)
    }

    /// Add sort clauses from a raw sort-key string
    fn sort(&self, state: &mut ExpressionAccumulator, keys: Option<&str>) -> FrontendResult<()> {
        self.delegate("sort")?.sort(state, keys)
    }

    /// Set the result window
    fn slice(&self, state: &mut ExpressionAccumulator, start: usize, size: usize) -> FrontendResult<()> {
        self.delegate("slice")?.slice(state, start, size)
    }

    /// Execute the accumulated expressions against the domain manager
    fn search(&self, ctx: &Context, state: &ExpressionAccumulator) -> FrontendResult<SearchResult> {
        self.delegate("search")?.search(ctx, state)
    }

    /// Dispatch an operation registered in a method table
    fn call(
        &self,
        ctx: &Context,
        state: &mut ExpressionAccumulator,
        operation: &str,
        args: &[Value],
    ) -> FrontendResult<Value> {
        self.delegate(operation)?.call(ctx, state, operation, args)
    }
}

impl fmt::Debug for dyn Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("interface", &self.interface())
            .field("layers", &layers(self))
            .finish()
    }
}

/// Layer names from outermost to innermost
pub fn layers(controller: &dyn Controller) -> Vec<String> {
    let mut names = vec![controller.name().to_string()];
    let mut current = controller.inner();
    while let Some(layer) = current {
        names.push(layer.name().to_string());
        current = layer.inner();
    }
    names
}

/// Shared reference to the outermost layer of one controller stack
///
/// Created once per stack build and handed to every layer's factory. The
/// chain builder binds it after the last decorator has been applied, so
/// layers can route calls through the complete stack.
#[derive(Clone, Default)]
pub struct OuterRef(Arc<OnceCell<Weak<dyn Controller>>>);

impl OuterRef {
    /// Create an unbound reference
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the outermost layer; returns `false` if already bound
    pub fn bind(&self, outer: &Arc<dyn Controller>) -> bool {
        self.0.set(Arc::downgrade(outer)).is_ok()
    }

    /// Outermost layer, `None` while unbound or after the stack was dropped
    pub fn get(&self) -> Option<Arc<dyn Controller>> {
        self.0.get().and_then(Weak::upgrade)
    }

    /// Whether the reference has been bound
    pub fn is_bound(&self) -> bool {
        self.0.get().is_some()
    }
}

impl fmt::Debug for OuterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OuterRef")
            .field("bound", &self.is_bound())
            .finish()
    }
}
