// Copyright 2025 Cowboy AI, LLC.

//! Decorator tracing every forwarded operation

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::DecoratorBase;
use crate::accumulator::ExpressionAccumulator;
use crate::context::Context;
use crate::controller::{Controller, OuterRef};
use crate::criteria::{Condition, Expression, Operator};
use crate::errors::FrontendResult;
use crate::manager::SearchResult;

/// Emits one `debug` event per operation before forwarding it
#[derive(Debug)]
pub struct Log {
    base: DecoratorBase,
}

impl Log {
    /// Wrap `inner`
    pub fn new(inner: Arc<dyn Controller>, outer: OuterRef) -> Self {
        Self {
            base: DecoratorBase::new("Log", inner, outer),
        }
    }
}

impl Controller for Log {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn inner(&self) -> Option<&Arc<dyn Controller>> {
        Some(self.base.inner())
    }

    fn outer(&self) -> Option<Arc<dyn Controller>> {
        self.base.outer()
    }

    fn add_expression(
        &self,
        state: &mut ExpressionAccumulator,
        expr: Option<Expression>,
    ) -> FrontendResult<()> {
        debug!(interface = self.interface(), operation = "addExpression", expression = ?expr);
        self.base.inner().add_expression(state, expr)
    }

    fn compare(&self, operator: Operator, key: &str, value: Value) -> FrontendResult<Condition> {
        debug!(interface = self.interface(), operation = "compare", %operator, key, %value);
        self.base.inner().compare(operator, key, value)
    }

    fn sort(&self, state: &mut ExpressionAccumulator, keys: Option<&str>) -> FrontendResult<()> {
        debug!(interface = self.interface(), operation = "sort", keys = ?keys);
        self.base.inner().sort(state, keys)
    }

    fn slice(&self, state: &mut ExpressionAccumulator, start: usize, size: usize) -> FrontendResult<()> {
        debug!(interface = self.interface(), operation = "slice", start, size);
        self.base.inner().slice(state, start, size)
    }

    fn search(&self, ctx: &Context, state: &ExpressionAccumulator) -> FrontendResult<SearchResult> {
        debug!(interface = self.interface(), operation = "search");
        let result = self.base.inner().search(ctx, state);
        if let Ok(found) = &result {
            debug!(interface = self.interface(), items = found.items.len(), total = ?found.total);
        }
        result
    }

    fn call(
        &self,
        ctx: &Context,
        state: &mut ExpressionAccumulator,
        operation: &str,
        args: &[Value],
    ) -> FrontendResult<Value> {
        debug!(interface = self.interface(), operation, args = args.len());
        self.base.inner().call(ctx, state, operation, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::StandardController;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_forwards() {
        let inner: Arc<dyn Controller> = Arc::new(StandardController::new("product", OuterRef::new()));
        let log = Log::new(inner, OuterRef::new());
        let mut state = ExpressionAccumulator::new();

        let cond = log
            .compare(Operator::Equal, "product.code", Value::from("abc"))
            .unwrap();
        log.add_expression(&mut state, Some(cond.into())).unwrap();
        log.sort(&mut state, Some("-code")).unwrap();
        log.slice(&mut state, 5, 10).unwrap();

        assert_eq!(log.interface(), "product");
        assert_eq!(state.conditions().len(), 1);
        assert_eq!(state.sortations().len(), 1);
        assert_eq!(state.slice().start, 5);
    }
}
