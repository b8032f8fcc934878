// Copyright 2025 Cowboy AI, LLC.

//! Decorator capping the number of items a search may request

use std::sync::Arc;

use super::DecoratorBase;
use crate::accumulator::{ExpressionAccumulator, DEFAULT_SLICE_SIZE};
use crate::config::PREFIX;
use crate::context::Context;
use crate::controller::{Controller, OuterRef};
use crate::errors::FrontendResult;

/// Clamps slice sizes to `controller/frontend/common/decorators/limit/max`
#[derive(Debug)]
pub struct Limit {
    base: DecoratorBase,
    max: usize,
}

impl Limit {
    /// Wrap `inner`, reading the maximum from the context configuration
    pub fn new(inner: Arc<dyn Controller>, ctx: &Context, outer: OuterRef) -> Self {
        let max = ctx
            .config()
            .get_u64(&format!("{PREFIX}/common/decorators/limit/max"))
            .map_or(DEFAULT_SLICE_SIZE, |max| usize::try_from(max).unwrap_or(usize::MAX));

        Self {
            base: DecoratorBase::new("Limit", inner, outer),
            max,
        }
    }

    /// Maximum slice size
    pub fn max(&self) -> usize {
        self.max
    }
}

impl Controller for Limit {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn inner(&self) -> Option<&Arc<dyn Controller>> {
        Some(self.base.inner())
    }

    fn outer(&self) -> Option<Arc<dyn Controller>> {
        self.base.outer()
    }

    fn slice(&self, state: &mut ExpressionAccumulator, start: usize, size: usize) -> FrontendResult<()> {
        self.base.inner().slice(state, start, size.min(self.max))
    }
}
