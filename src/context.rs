// Copyright 2025 Cowboy AI, LLC.

//! Shared request context handed to controllers

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::{FrontendError, FrontendResult};
use crate::manager::Manager;

/// Request context: configuration, domain managers and locale
///
/// Cloning is cheap; all members are shared.
#[derive(Clone, Default)]
pub struct Context {
    config: Arc<Config>,
    managers: HashMap<String, Arc<dyn Manager>>,
    locale: Option<String>,
}

impl Context {
    /// Create a context around a configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            managers: HashMap::new(),
            locale: None,
        }
    }

    /// Register the manager serving `domain`
    pub fn with_manager(mut self, domain: impl Into<String>, manager: Arc<dyn Manager>) -> Self {
        self.managers.insert(domain.into(), manager);
        self
    }

    /// Set the locale tag
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Configuration tree
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locale tag, if any
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Manager serving `domain`
    pub fn manager(&self, domain: &str) -> FrontendResult<Arc<dyn Manager>> {
        self.managers.get(domain).cloned().ok_or_else(|| FrontendError::Manager {
            domain: domain.to_string(),
            message: "no manager available".to_string(),
        })
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut domains: Vec<_> = self.managers.keys().collect();
        domains.sort();
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("managers", &domains)
            .field("locale", &self.locale)
            .finish()
    }
}
