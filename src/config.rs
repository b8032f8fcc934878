// Copyright 2025 Cowboy AI, LLC.

//! Hierarchical, slash-addressed configuration
//!
//! Configuration is an immutable JSON tree. Keys such as
//! `controller/frontend/product/name` walk nested objects one segment at a time.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{FrontendError, FrontendResult};

/// Key prefix shared by every frontend controller setting
pub const PREFIX: &str = "controller/frontend";

/// Immutable configuration tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    root: Value,
}

impl Config {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON value
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse a JSON document
    pub fn from_json_str(input: &str) -> FrontendResult<Self> {
        Ok(Self::from_value(serde_json::from_str(input)?))
    }

    /// Parse a TOML document
    pub fn from_toml_str(input: &str) -> FrontendResult<Self> {
        let table: toml::Value = toml::from_str(input)?;
        Ok(Self::from_value(serde_json::to_value(table)?))
    }

    /// Return a copy with `value` stored under `key`, creating intermediate objects
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
        insert(&mut self.root, &segments, value.into());
        self
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&Value> {
        key.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(&self.root, |node, segment| node.get(segment))
            .filter(|value| !value.is_null())
    }

    /// Look up a string value, `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up a list of strings; an absent key yields an empty list
    pub fn get_list(&self, key: &str) -> FrontendResult<Vec<String>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        FrontendError::Configuration(format!(
                            "\"{key}\" must contain only strings, found {item}"
                        ))
                    })
                })
                .collect(),
            Some(other) => Err(FrontendError::Configuration(format!(
                "\"{key}\" must be a list of strings, found {other}"
            ))),
        }
    }

    /// Look up an unsigned integer
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }
}

fn insert(node: &mut Value, segments: &[&str], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        insert(map.entry(segment.to_string()).or_insert(Value::Null), rest, value);
    }
}

/// Decorator names configured for one controller path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DecoratorSettings {
    /// Shared decorators applied to every controller
    pub default: Vec<String>,
    /// Shared decorators removed from `default` for this path
    pub excludes: Vec<String>,
    /// Shared-namespace decorators selected for this path
    pub global: Vec<String>,
    /// Path-namespace decorators
    pub local: Vec<String>,
}

impl DecoratorSettings {
    /// Read the settings for `path` from the configuration
    pub fn load(config: &Config, path: &str) -> FrontendResult<Self> {
        Ok(Self {
            default: config.get_list(&format!("{PREFIX}/common/decorators/default"))?,
            excludes: config.get_list(&format!("{PREFIX}/{path}/decorators/excludes"))?,
            global: config.get_list(&format!("{PREFIX}/{path}/decorators/global"))?,
            local: config.get_list(&format!("{PREFIX}/{path}/decorators/local"))?,
        })
    }

    /// Default decorators with the excluded names removed, in configured order
    pub fn effective_default(&self) -> Vec<&str> {
        self.default
            .iter()
            .filter(|name| !self.excludes.contains(name))
            .map(String::as_str)
            .collect()
    }
}

/// Configured implementation name for `path`, `Standard` when unset
pub fn implementation_name<'a>(config: &'a Config, path: &str) -> &'a str {
    config
        .get_str(&format!("{PREFIX}/{path}/name"))
        .unwrap_or("Standard")
}
