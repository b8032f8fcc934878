// Copyright 2025 Cowboy AI, LLC.

//! Error types for controller resolution, decoration and delegation

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors that can occur while composing or driving frontend controllers
#[derive(Debug, Clone, Error)]
pub enum FrontendError {
    /// Controller path was empty
    #[error("Controller path is empty")]
    EmptyPath,

    /// A path segment, implementation or decorator name contained unsupported characters
    #[error("Invalid {kind} name \"{name}\"")]
    InvalidName {
        /// What was being named (path, implementation, decorator)
        kind: &'static str,
        /// The rejected name
        name: String,
    },

    /// No controller is registered for the resolved class identifier
    #[error("Class \"{0}\" not available")]
    Unresolvable(String),

    /// A controller or decorator does not fit the interface it is used for
    #[error("Class \"{class}\" requires interface \"{expected}\" but got \"{found}\"")]
    Incompatible {
        /// Controller class or decorator name
        class: String,
        /// Interface required
        expected: String,
        /// Interface actually provided
        found: String,
    },

    /// An operation reached a layer that neither implements nor forwards it
    #[error("Unable to call method \"{operation}\" on controller \"{controller}\"")]
    NoSuchOperation {
        /// Operation name
        operation: String,
        /// Layer that ended the delegation chain
        controller: String,
    },

    /// Malformed configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Domain-specific controller error with structured details
    #[error("Controller error: {message}")]
    Controller {
        /// Error message
        message: String,
        /// Structured error list (field -> reason)
        details: BTreeMap<String, String>,
    },

    /// Error reported by the external domain manager
    #[error("Manager error: {domain} - {message}")]
    Manager {
        /// Domain of the failing manager
        domain: String,
        /// Error message from the manager
        message: String,
    },

    /// Registration of a name that already exists
    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for frontend operations
pub type FrontendResult<T> = Result<T, FrontendError>;

impl From<serde_json::Error> for FrontendError {
    fn from(err: serde_json::Error) -> Self {
        FrontendError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for FrontendError {
    fn from(err: toml::de::Error) -> Self {
        FrontendError::Serialization(err.to_string())
    }
}

impl FrontendError {
    /// Create a controller error without details
    pub fn controller(msg: impl Into<String>) -> Self {
        FrontendError::Controller {
            message: msg.into(),
            details: BTreeMap::new(),
        }
    }

    /// Create a controller error carrying a structured error list
    pub fn controller_with_details(
        msg: impl Into<String>,
        details: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        FrontendError::Controller {
            message: msg.into(),
            details: details.into_iter().collect(),
        }
    }

    /// Create a no-such-operation error
    pub fn no_such_operation(operation: impl Into<String>, controller: impl Into<String>) -> Self {
        FrontendError::NoSuchOperation {
            operation: operation.into(),
            controller: controller.into(),
        }
    }

    /// Check if this error stems from invalid configuration or names
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FrontendError::InvalidName { .. } | FrontendError::Configuration(_)
        )
    }

    /// Check if this error occurred while resolving a controller
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            FrontendError::EmptyPath
                | FrontendError::Unresolvable(_)
                | FrontendError::Incompatible { .. }
        )
    }
}
