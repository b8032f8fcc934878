// Copyright 2025 Cowboy AI, LLC.

//! Per-request controller handle

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::Controller;
use crate::accumulator::ExpressionAccumulator;
use crate::context::Context;
use crate::criteria::{Condition, Expression, Operator, Sort};
use crate::errors::FrontendResult;
use crate::manager::SearchResult;
use crate::registry::ClassId;

/// Controller stack plus the state of one logical request
///
/// The stack is a shared, immutable template; every handle owns a fresh
/// accumulator. Cloning a handle copies the accumulated expressions and
/// assigns a new handle id.
pub struct ControllerHandle {
    id: Uuid,
    class_id: ClassId,
    template: Arc<dyn Controller>,
    context: Context,
    state: ExpressionAccumulator,
}

impl ControllerHandle {
    /// Create a handle with empty request state
    pub fn new(class_id: ClassId, template: Arc<dyn Controller>, context: Context) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_id,
            template,
            context,
            state: ExpressionAccumulator::new(),
        }
    }

    /// Unique id of this handle
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Class identifier the template was resolved from
    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    /// Outermost layer of the controller stack
    pub fn template(&self) -> &Arc<dyn Controller> {
        &self.template
    }

    /// Request context
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Accumulated request state
    pub fn state(&self) -> &ExpressionAccumulator {
        &self.state
    }

    /// Conditions in insertion order
    pub fn conditions(&self) -> &[Condition] {
        self.state.conditions()
    }

    /// Sort clauses in insertion order
    pub fn sortations(&self) -> &[Sort] {
        self.state.sortations()
    }

    /// Add an expression through the controller stack; `None` is ignored
    pub fn add_expression(&mut self, expr: Option<Expression>) -> FrontendResult<&mut Self> {
        self.template.add_expression(&mut self.state, expr)?;
        Ok(self)
    }

    /// Add a comparison, e.g. `compare("==", "product.code", "abc")`
    pub fn compare(
        &mut self,
        operator: &str,
        key: &str,
        value: impl Into<Value>,
    ) -> FrontendResult<&mut Self> {
        let condition = self
            .template
            .compare(Operator::parse(operator)?, key, value.into())?;
        self.add_expression(Some(condition.into()))
    }

    /// Add a condition from its JSON form, e.g. `{"&&": [{"==": {"product.code": "abc"}}]}`
    pub fn parse(&mut self, conditions: &Value) -> FrontendResult<&mut Self> {
        let condition = Condition::parse(conditions)?;
        self.add_expression(condition.map(Expression::from))
    }

    /// Add sort clauses from a sort-key string such as `"-position,code"`
    pub fn sort(&mut self, keys: Option<&str>) -> FrontendResult<&mut Self> {
        self.template.sort(&mut self.state, keys)?;
        Ok(self)
    }

    /// Set the result window
    pub fn slice(&mut self, start: usize, size: usize) -> FrontendResult<&mut Self> {
        self.template.slice(&mut self.state, start, size)?;
        Ok(self)
    }

    /// Execute the accumulated expressions
    pub fn search(&self) -> FrontendResult<SearchResult> {
        self.template.search(&self.context, &self.state)
    }

    /// Dispatch a registered operation through the stack
    pub fn call(&mut self, operation: &str, args: &[Value]) -> FrontendResult<Value> {
        self.template
            .call(&self.context, &mut self.state, operation, args)
    }
}

impl Clone for ControllerHandle {
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_id: self.class_id.clone(),
            template: Arc::clone(&self.template),
            context: self.context.clone(),
            state: self.state.clone(),
        }
    }
}

impl fmt::Debug for ControllerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerHandle")
            .field("id", &self.id)
            .field("class_id", &self.class_id)
            .field("template", &self.template)
            .field("state", &self.state)
            .finish()
    }
}
