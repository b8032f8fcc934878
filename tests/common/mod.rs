// Copyright 2025 Cowboy AI, LLC.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cim_frontend::{
    Controller, DecoratorBase, DecoratorRegistration, ExpressionAccumulator, Expression,
    FrontendResult, OuterRef, SearchResult, Context,
};
use serde_json::Value;

/// Names recorded by [`Trace`] layers, in call order
pub type Calls = Arc<Mutex<Vec<String>>>;

/// Decorator recording its name before forwarding
pub struct Trace {
    base: DecoratorBase,
    calls: Calls,
}

impl Controller for Trace {
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
        self.calls.lock().unwrap().push(self.name().to_string());
        self.base.inner().add_expression(state, expr)
    }

    fn search(&self, ctx: &Context, state: &ExpressionAccumulator) -> FrontendResult<SearchResult> {
        self.calls.lock().unwrap().push(self.name().to_string());
        self.base.inner().search(ctx, state)
    }

    fn call(
        &self,
        ctx: &Context,
        state: &mut ExpressionAccumulator,
        operation: &str,
        args: &[Value],
    ) -> FrontendResult<Value> {
        self.calls.lock().unwrap().push(self.name().to_string());
        self.base.inner().call(ctx, state, operation, args)
    }
}

fn trace_factory(
    name: &'static str,
    calls: &Calls,
) -> impl Fn(Arc<dyn Controller>, &Context, &OuterRef) -> FrontendResult<Arc<dyn Controller>>
       + Send
       + Sync
       + 'static {
    let calls = Arc::clone(calls);
    move |inner, _, outer| {
        Ok(Arc::new(Trace {
            base: DecoratorBase::new(name, inner, outer.clone()),
            calls: Arc::clone(&calls),
        }) as Arc<dyn Controller>)
    }
}

/// Shared-namespace tracing decorator
pub fn shared_trace(name: &'static str, calls: &Calls) -> DecoratorRegistration {
    DecoratorRegistration::shared(name, trace_factory(name, calls))
}

/// Path-namespace tracing decorator
pub fn local_trace(path: &str, name: &'static str, calls: &Calls) -> DecoratorRegistration {
    DecoratorRegistration::local(path, name, trace_factory(name, calls))
}

/// Recorded names
pub fn recorded(calls: &Calls) -> Vec<String> {
    calls.lock().unwrap().clone()
}
