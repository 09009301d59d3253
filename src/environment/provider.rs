//! Environment providers.
//!
//! Resolution never reads `std::env` directly. It asks an
//! [`EnvironmentProvider`], which lets tests and embedding callers supply a
//! fixed set of variables while the CLI uses the layered process
//! environment.

use std::collections::HashMap;

use crate::config::{EnvLayerStack, LayerOrigin};

/// A variable value together with the layer it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidedValue {
    /// The raw string value.
    pub value: String,
    /// Where the value came from.
    pub origin: LayerOrigin,
}

/// Source of named string variables.
pub trait EnvironmentProvider {
    /// Look up a variable. Returns `None` when it is not set.
    fn provide(&self, key: &str) -> Option<ProvidedValue>;
}

impl EnvironmentProvider for EnvLayerStack {
    fn provide(&self, key: &str) -> Option<ProvidedValue> {
        self.lookup(key).map(|(value, origin)| ProvidedValue {
            value: value.to_string(),
            origin: origin.clone(),
        })
    }
}

/// Reads the live process environment on every lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentProvider for ProcessEnvironment {
    fn provide(&self, key: &str) -> Option<ProvidedValue> {
        std::env::var(key).ok().map(|value| ProvidedValue {
            value,
            origin: LayerOrigin::Process,
        })
    }
}

/// A fixed map of variables.
///
/// # Example
///
/// ```
/// use bxplan::environment::{EnvironmentProvider, StaticEnvironment};
///
/// let env = StaticEnvironment::new().with("NODE_ENV", "production");
/// assert_eq!(env.provide("NODE_ENV").unwrap().value, "production");
/// assert!(env.provide("USE_LOCAL_MOCO").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn provide(&self, key: &str) -> Option<ProvidedValue> {
        self.vars.get(key).map(|value| ProvidedValue {
            value: value.clone(),
            origin: LayerOrigin::Fixed("static environment".to_string()),
        })
    }
}
