// Copyright 2025 Cowboy AI, LLC.

//! Frontend controller resolver
//!
//! ```text
//! create(ctx, "basket")
//!   -> class id  Basket::<controller/frontend/basket/name or Standard>
//!   -> cached stack, or factory + decorator chain (stored when caching is on)
//!   -> new ControllerHandle with an empty accumulator
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::cache::PrototypeCache;
use crate::config::{implementation_name, DecoratorSettings};
use crate::context::Context;
use crate::controller::{Controller, ControllerHandle, OuterRef};
use crate::decorator::wrap;
use crate::errors::{FrontendError, FrontendResult};
use crate::registry::{validate_path, ClassId, Registry};

/// Resolves controller paths to decorated controller handles
#[derive(Debug, Clone)]
pub struct Frontend {
    registry: Arc<Registry>,
    cache: Arc<PrototypeCache>,
}

impl Frontend {
    /// Create a resolver with its own enabled cache
    pub fn new(registry: Registry) -> Self {
        Self::with_cache(registry, Arc::new(PrototypeCache::new()))
    }

    /// Create a resolver sharing an existing cache
    pub fn with_cache(registry: Registry, cache: Arc<PrototypeCache>) -> Self {
        Self {
            registry: Arc::new(registry),
            cache,
        }
    }

    /// Registered factories
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Prototype cache service
    pub fn prototypes(&self) -> &Arc<PrototypeCache> {
        &self.cache
    }

    /// Resolve `path` to a handle
    ///
    /// `name` overrides the implementation configured under
    /// `controller/frontend/<path>/name`, which defaults to `Standard`.
    pub fn create(&self, ctx: &Context, path: &str, name: Option<&str>) -> FrontendResult<ControllerHandle> {
        validate_path(path)?;

        let name = name.unwrap_or_else(|| implementation_name(ctx.config(), path));
        let class_id = ClassId::controller(path, name)?;

        let stack = match self.cache.get(&class_id) {
            Some(stack) => {
                debug!(%class_id, "Controller cache hit");
                stack
            }
            None => {
                debug!(%class_id, "Controller cache miss");
                let stack = self.build(ctx, path, &class_id)?;
                self.cache.put(class_id.clone(), Arc::clone(&stack));
                stack
            }
        };

        Ok(ControllerHandle::new(class_id, stack, ctx.clone()))
    }

    /// Force the stack returned for `class_id`, or clear the slot with `None`
    ///
    /// Injected stacks are only used while caching is enabled. Toggle caching
    /// afterwards to drop them.
    pub fn inject(&self, class_id: impl Into<ClassId>, controller: Option<Arc<dyn Controller>>) {
        self.cache.inject(class_id.into(), controller);
    }

    /// Enable or disable caching; both drop every cached stack
    pub fn cache(&self, enabled: bool) {
        self.cache.set_enabled(enabled);
    }

    /// Decorator settings that apply to `path`
    pub fn settings(&self, ctx: &Context, path: &str) -> FrontendResult<DecoratorSettings> {
        validate_path(path)?;
        DecoratorSettings::load(ctx.config(), path)
    }

    fn build(&self, ctx: &Context, path: &str, class_id: &ClassId) -> FrontendResult<Arc<dyn Controller>> {
        let factory = self
            .registry
            .controller(class_id)
            .ok_or_else(|| FrontendError::Unresolvable(class_id.to_string()))?;

        let outer = OuterRef::new();
        let base = (**factory)(ctx, &outer)?;

        if base.interface() != path {
            return Err(FrontendError::Incompatible {
                class: class_id.to_string(),
                expected: path.to_string(),
                found: base.interface().to_string(),
            });
        }

        wrap(&self.registry, ctx, base, path, &outer)
    }
}
