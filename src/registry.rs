// Copyright 2025 Cowboy AI, LLC.

//! Registry of controller and decorator factories
//!
//! Controllers are registered per `(path, implementation)` and decorators per
//! `(namespace, name)` once at start-up. Names are validated on registration,
//! so resolving a configured name never builds identifiers from unchecked input.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::controller::{Controller, OuterRef, StandardController};
use crate::errors::{FrontendError, FrontendResult};

/// Builds the base controller of a stack from the shared context
pub type ControllerFactory =
    Arc<dyn Fn(&Context, &OuterRef) -> FrontendResult<Arc<dyn Controller>> + Send + Sync>;

/// Wraps an inner controller with a decorator layer
pub type DecoratorFactory = Arc<
    dyn Fn(Arc<dyn Controller>, &Context, &OuterRef) -> FrontendResult<Arc<dyn Controller>>
        + Send
        + Sync,
>;

/// Canonical identifier of a controller or decorator class
///
/// Path segments are capitalised and joined with `::`, followed by the
/// implementation name: `basket/address` + `Standard` is `Basket::Address::Standard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(String);

impl ClassId {
    /// Identifier of a controller implementation, validating both parts
    pub fn controller(path: &str, name: &str) -> FrontendResult<Self> {
        validate_path(path)?;
        validate_name("implementation", name)?;
        Ok(Self(format!("{}::{}", qualify(path), name)))
    }

    /// Identifier of a decorator, validating its name
    pub fn decorator(namespace: &Namespace, name: &str) -> FrontendResult<Self> {
        validate_name("decorator", name)?;
        let prefix = match namespace {
            Namespace::Shared => "Common".to_string(),
            Namespace::Domain(path) => {
                validate_path(path)?;
                qualify(path)
            }
        };
        Ok(Self(format!("{prefix}::Decorator::{name}")))
    }

    /// Identifier as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClassId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Namespace a decorator name is looked up in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// Decorators shared by every controller (`default` and `global` tiers)
    Shared,
    /// Decorators of one controller path (`local` tier)
    Domain(String),
}

/// Check that `path` is non-empty and each `/` segment is alphanumeric
pub fn validate_path(path: &str) -> FrontendResult<()> {
    if path.is_empty() {
        return Err(FrontendError::EmptyPath);
    }
    if path.split('/').all(is_alphanumeric) {
        Ok(())
    } else {
        Err(FrontendError::InvalidName {
            kind: "path",
            name: path.to_string(),
        })
    }
}

/// Check that `name` is a non-empty alphanumeric identifier
pub fn validate_name(kind: &'static str, name: &str) -> FrontendResult<()> {
    if is_alphanumeric(name) {
        Ok(())
    } else {
        Err(FrontendError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

fn is_alphanumeric(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_alphanumeric())
}

fn qualify(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("::")
}

/// Registered decorator
#[derive(Clone)]
pub struct DecoratorRegistration {
    /// Namespace the name is registered in
    pub namespace: Namespace,
    /// Decorator name as used in configuration
    pub name: String,
    /// Interface the wrapped controller must provide
    pub requires: Option<String>,
    /// Constructor
    pub factory: DecoratorFactory,
}

impl DecoratorRegistration {
    /// Decorator usable in the `default` and `global` tiers of any controller
    pub fn shared<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Arc<dyn Controller>, &Context, &OuterRef) -> FrontendResult<Arc<dyn Controller>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            namespace: Namespace::Shared,
            name: name.into(),
            requires: None,
            factory: Arc::new(factory),
        }
    }

    /// Decorator of the `local` tier of `path`; requires the path's interface
    pub fn local<F>(path: impl Into<String>, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Arc<dyn Controller>, &Context, &OuterRef) -> FrontendResult<Arc<dyn Controller>>
            + Send
            + Sync
            + 'static,
    {
        let path = path.into();
        Self {
            requires: Some(path.clone()),
            namespace: Namespace::Domain(path),
            name: name.into(),
            factory: Arc::new(factory),
        }
    }

    /// Require the wrapped controller to provide `interface`
    pub fn requires(mut self, interface: impl Into<String>) -> Self {
        self.requires = Some(interface.into());
        self
    }

    /// Class identifier of this decorator
    pub fn class_id(&self) -> FrontendResult<ClassId> {
        ClassId::decorator(&self.namespace, &self.name)
    }
}

impl fmt::Debug for DecoratorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorRegistration")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("requires", &self.requires)
            .finish()
    }
}

/// Controller and decorator factories by class identifier
#[derive(Default)]
pub struct Registry {
    controllers: IndexMap<ClassId, ControllerFactory>,
    decorators: IndexMap<ClassId, DecoratorRegistration>,
}

impl Registry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Controller factory for a class identifier
    pub fn controller(&self, class_id: &ClassId) -> Option<&ControllerFactory> {
        self.controllers.get(class_id)
    }

    /// Decorator registered under `name` in `namespace`
    pub fn decorator(&self, namespace: &Namespace, name: &str) -> FrontendResult<&DecoratorRegistration> {
        let class_id = ClassId::decorator(namespace, name)?;
        self.decorators
            .get(&class_id)
            .ok_or_else(|| FrontendError::Unresolvable(class_id.to_string()))
    }

    /// Registered controller identifiers in registration order
    pub fn class_ids(&self) -> impl Iterator<Item = &ClassId> {
        self.controllers.keys()
    }

    /// Registered decorator identifiers in registration order
    pub fn decorator_ids(&self) -> impl Iterator<Item = &ClassId> {
        self.decorators.keys()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("controllers", &self.controllers.keys().collect::<Vec<_>>())
            .field("decorators", &self.decorators.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder validating every registration
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller implementation for `path`
    pub fn add_controller<F>(mut self, path: &str, name: &str, factory: F) -> FrontendResult<Self>
    where
        F: Fn(&Context, &OuterRef) -> FrontendResult<Arc<dyn Controller>> + Send + Sync + 'static,
    {
        let class_id = ClassId::controller(path, name)?;
        if self.registry.controllers.contains_key(&class_id) {
            return Err(FrontendError::AlreadyRegistered(class_id.0));
        }

        self.registry.controllers.insert(class_id, Arc::new(factory));
        Ok(self)
    }

    /// Register the [`StandardController`] for `path`
    pub fn add_standard(self, path: &str) -> FrontendResult<Self> {
        let owned = path.to_string();
        self.add_controller(path, "Standard", move |_, outer| {
            Ok(Arc::new(StandardController::new(owned.clone(), outer.clone())) as Arc<dyn Controller>)
        })
    }

    /// Register a decorator
    pub fn add_decorator(mut self, registration: DecoratorRegistration) -> FrontendResult<Self> {
        let class_id = registration.class_id()?;
        if self.registry.decorators.contains_key(&class_id) {
            return Err(FrontendError::AlreadyRegistered(class_id.0));
        }

        self.registry.decorators.insert(class_id, registration);
        Ok(self)
    }

    /// Finish building
    pub fn build(self) -> Registry {
        self.registry
    }
}
