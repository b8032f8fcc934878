// Copyright 2025 Cowboy AI, LLC.

//! Three-tier decorator chain builder

use std::sync::Arc;

use tracing::debug;

use crate::config::DecoratorSettings;
use crate::context::Context;
use crate::controller::{Controller, OuterRef};
use crate::errors::{FrontendError, FrontendResult};
use crate::registry::{Namespace, Registry};

/// Wrap `base` with the decorators configured for `path`
///
/// Tiers are applied in order: shared `default` decorators minus the path's
/// `excludes`, the path's `global` decorators (shared namespace), then its
/// `local` decorators (path namespace). Within a tier the first name wraps
/// innermost. Once the stack is complete, `outer` is bound to its outermost
/// layer.
pub fn wrap(
    registry: &Registry,
    ctx: &Context,
    base: Arc<dyn Controller>,
    path: &str,
    outer: &OuterRef,
) -> FrontendResult<Arc<dyn Controller>> {
    let settings = DecoratorSettings::load(ctx.config(), path)?;
    let shared = Namespace::Shared;
    let local = Namespace::Domain(path.to_string());

    let tiers = settings
        .effective_default()
        .into_iter()
        .map(|name| (&shared, name))
        .chain(settings.global.iter().map(|name| (&shared, name.as_str())))
        .chain(settings.local.iter().map(|name| (&local, name.as_str())));

    let mut controller = base;
    for (namespace, name) in tiers {
        controller = decorate(registry, ctx, controller, namespace, name, outer)?;
    }

    if !outer.bind(&controller) {
        debug!(path, "Outer reference already bound");
    }
    Ok(controller)
}

fn decorate(
    registry: &Registry,
    ctx: &Context,
    inner: Arc<dyn Controller>,
    namespace: &Namespace,
    name: &str,
    outer: &OuterRef,
) -> FrontendResult<Arc<dyn Controller>> {
    let registration = registry.decorator(namespace, name)?;

    if let Some(expected) = &registration.requires {
        if inner.interface() != expected.as_str() {
            return Err(FrontendError::Incompatible {
                class: name.to_string(),
                expected: expected.clone(),
                found: inner.interface().to_string(),
            });
        }
    }

    debug!(decorator = name, interface = inner.interface(), "Applying decorator");
    (*registration.factory)(inner, ctx, outer)
}
