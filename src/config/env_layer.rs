//! Environment variable layering.
//!
//! The process environment always wins over a `.env` file, so a stack is
//! built with the file first and the process environment on top. Each layer
//! remembers where it came from so resolved values can report their source.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::env_file::EnvFileParser;
use crate::error::Result;

/// Where a layer's variables came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerOrigin {
    /// The environment of the running process.
    Process,
    /// A parsed `.env` file.
    EnvFile(PathBuf),
    /// Values supplied programmatically (tests, embedding callers).
    Fixed(String),
}

impl fmt::Display for LayerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process => write!(f, "process environment"),
            Self::EnvFile(path) => write!(f, "{}", path.display()),
            Self::Fixed(label) => write!(f, "{}", label),
        }
    }
}

/// Represents a layer of environment variables.
///
/// # Example
///
/// ```
/// use bxplan::config::{EnvLayer, LayerOrigin};
///
/// let mut layer = EnvLayer::new(LayerOrigin::Fixed("defaults".into()));
/// layer.set("USE_LOCAL_MOCO", "true");
///
/// assert_eq!(layer.vars.get("USE_LOCAL_MOCO").map(String::as_str), Some("true"));
/// assert_eq!(layer.origin.to_string(), "defaults");
/// ```
#[derive(Debug, Clone)]
pub struct EnvLayer {
    /// Variables in this layer.
    pub vars: HashMap<String, String>,
    /// Source of this layer.
    pub origin: LayerOrigin,
}

impl EnvLayer {
    /// Create a new empty layer with the given origin.
    pub fn new(origin: LayerOrigin) -> Self {
        Self {
            vars: HashMap::new(),
            origin,
        }
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped; none of
    /// them can be a variable bxplan reads.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self {
            vars,
            origin: LayerOrigin::Process,
        }
    }

    /// Load a `.env` file. A missing file yields an empty layer.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        Ok(Self {
            vars: EnvFileParser::load_optional(path)?,
            origin: LayerOrigin::EnvFile(path.to_path_buf()),
        })
    }

    /// Add a variable to this layer.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Check if this layer has a variable.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Get the number of variables in this layer.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if this layer is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Manages layered environment variables.
///
/// The first layer pushed has lowest priority, the last has highest.
///
/// # Example
///
/// ```
/// use bxplan::config::{EnvLayer, EnvLayerStack, LayerOrigin};
/// use std::path::PathBuf;
///
/// let mut stack = EnvLayerStack::new();
///
/// let mut file = EnvLayer::new(LayerOrigin::EnvFile(PathBuf::from(".env")));
/// file.set("USE_LOCAL_MOCO", "true");
/// file.set("FILE_ONLY", "yes");
/// stack.push(file);
///
/// let mut process = EnvLayer::new(LayerOrigin::Process);
/// process.set("USE_LOCAL_MOCO", "false");
/// stack.push(process);
///
/// assert_eq!(stack.get("USE_LOCAL_MOCO"), Some("false"));
/// assert_eq!(stack.get("FILE_ONLY"), Some("yes"));
/// assert_eq!(stack.origin_of("USE_LOCAL_MOCO"), Some(&LayerOrigin::Process));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvLayerStack {
    /// Layers from lowest to highest priority.
    layers: Vec<EnvLayer>,
}

impl EnvLayerStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { layers: vec![] }
    }

    /// Build the standard stack: optional `.env` file under the process
    /// environment.
    pub fn standard(env_file: Option<&Path>) -> Result<Self> {
        Self::over_env_file(env_file, EnvLayer::from_process())
    }

    /// Build a stack with `top` over the optional `.env` file.
    pub fn over_env_file(env_file: Option<&Path>, top: EnvLayer) -> Result<Self> {
        let mut stack = Self::new();
        if let Some(path) = env_file {
            let layer = EnvLayer::from_env_file(path)?;
            tracing::debug!(
                "Loaded {} variable(s) from {}",
                layer.len(),
                path.display()
            );
            stack.push(layer);
        }
        stack.push(top);
        Ok(stack)
    }

    /// Add a layer. Later layers have higher priority.
    pub fn push(&mut self, layer: EnvLayer) {
        self.layers.push(layer);
    }

    /// Get the resolved value for a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key).map(|(value, _)| value)
    }

    /// Get the resolved value together with the layer it came from.
    pub fn lookup(&self, key: &str) -> Option<(&str, &LayerOrigin)> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.vars.get(key).map(|v| (v.as_str(), &layer.origin)))
    }

    /// Get the origin of a variable's value.
    pub fn origin_of(&self, key: &str) -> Option<&LayerOrigin> {
        self.lookup(key).map(|(_, origin)| origin)
    }

    /// Get all layers for inspection.
    pub fn layers(&self) -> &[EnvLayer] {
        &self.layers
    }

    /// Get the number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
