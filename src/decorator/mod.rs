// Copyright 2025 Cowboy AI, LLC.

//! Controller decorators
//!
//! Decorators wrap a controller and override the operations they extend;
//! everything else is forwarded by the [`Controller`] default methods.
//! [`wrap`] assembles the configured decorator tiers around a base controller.

mod chain;
mod limit;
mod log;

use std::sync::Arc;

use crate::controller::{Controller, OuterRef};
use crate::errors::FrontendResult;
use crate::registry::{DecoratorRegistration, RegistryBuilder};

pub use chain::wrap;
pub use limit::Limit;
pub use log::Log;

/// State shared by every decorator layer
#[derive(Debug, Clone)]
pub struct DecoratorBase {
    name: String,
    inner: Arc<dyn Controller>,
    outer: OuterRef,
}

impl DecoratorBase {
    /// Create the common part of a decorator layer
    pub fn new(name: impl Into<String>, inner: Arc<dyn Controller>, outer: OuterRef) -> Self {
        Self {
            name: name.into(),
            inner,
            outer,
        }
    }

    /// Decorator name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrapped controller
    pub fn inner(&self) -> &Arc<dyn Controller> {
        &self.inner
    }

    /// Outermost layer of the stack
    pub fn outer(&self) -> Option<Arc<dyn Controller>> {
        self.outer.get()
    }
}

impl RegistryBuilder {
    /// Register the decorators shipped with this crate (`Log`, `Limit`)
    pub fn with_builtin_decorators(self) -> FrontendResult<Self> {
        self.add_decorator(DecoratorRegistration::shared("Log", |inner, _, outer| {
            Ok(Arc::new(Log::new(inner, outer.clone())) as Arc<dyn Controller>)
        }))?
        .add_decorator(DecoratorRegistration::shared("Limit", |inner, ctx, outer| {
            Ok(Arc::new(Limit::new(inner, ctx, outer.clone())) as Arc<dyn Controller>)
        }))
    }
}
