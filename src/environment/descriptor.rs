//! The environment descriptor: everything plan resolution depends on.

use std::fmt;

use serde::{Serialize, Serializer};

/// Node environment mode.
///
/// Empty or absent values mean development. Values other than
/// `development` and `production` are kept verbatim and behave like
/// development everywhere except in the rendered `mode`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeEnvironment {
    #[default]
    Development,
    Production,
    Other(String),
}

impl NodeEnvironment {
    /// Parse a raw value. Falsy input (absent or empty) yields development.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Development,
            Some("development") => Self::Development,
            Some("production") => Self::Production,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Other(s) => s,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for NodeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeEnvironment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Inputs to plan resolution. Immutable once built.
///
/// # Example
///
/// ```
/// use bxplan::environment::{EnvironmentDescriptor, NodeEnvironment};
///
/// let env = EnvironmentDescriptor::new("chrome", "1.2.0")
///     .with_node_environment(NodeEnvironment::Production)
///     .with_local_mock_service(EnvironmentDescriptor::parse_mock_flag(Some("true")));
///
/// assert!(env.is_production());
/// assert!(env.use_local_mock_service);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EnvironmentDescriptor {
    /// Browser family; selects the output subdirectory.
    pub browser_target: Option<String>,
    /// Node environment mode.
    pub node_environment: NodeEnvironment,
    /// Whether the extension should talk to a local mock service.
    pub use_local_mock_service: bool,
    /// Package version embedded in bundle and archive names.
    pub package_version: Option<String>,
}

impl EnvironmentDescriptor {
    /// Development descriptor for a browser and version.
    pub fn new(browser_target: impl Into<String>, package_version: impl Into<String>) -> Self {
        Self {
            browser_target: Some(browser_target.into()),
            package_version: Some(package_version.into()),
            ..Self::default()
        }
    }

    pub fn with_node_environment(mut self, node_environment: NodeEnvironment) -> Self {
        self.node_environment = node_environment;
        self
    }

    pub fn with_local_mock_service(mut self, enabled: bool) -> Self {
        self.use_local_mock_service = enabled;
        self
    }

    /// Interpret the raw mock-service flag. Only the exact string `"true"`
    /// enables it.
    pub fn parse_mock_flag(raw: Option<&str>) -> bool {
        raw == Some("true")
    }

    pub fn is_production(&self) -> bool {
        self.node_environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_environment_defaults_when_falsy() {
        assert_eq!(NodeEnvironment::parse(None), NodeEnvironment::Development);
        assert_eq!(NodeEnvironment::parse(Some("")), NodeEnvironment::Development);
    }

    #[test]
    fn node_environment_known_values() {
        assert_eq!(
            NodeEnvironment::parse(Some("production")),
            NodeEnvironment::Production
        );
        assert_eq!(
            NodeEnvironment::parse(Some("development")),
            NodeEnvironment::Development
        );
    }

    #[test]
    fn node_environment_other_is_not_production() {
        let env = NodeEnvironment::parse(Some("Production"));
        assert_eq!(env, NodeEnvironment::Other("Production".into()));
        assert!(!env.is_production());
        assert_eq!(env.as_str(), "Production");
    }

    #[test]
    fn mock_flag_requires_exact_true() {
        assert!(EnvironmentDescriptor::parse_mock_flag(Some("true")));
        assert!(!EnvironmentDescriptor::parse_mock_flag(Some("false")));
        assert!(!EnvironmentDescriptor::parse_mock_flag(Some("TRUE")));
        assert!(!EnvironmentDescriptor::parse_mock_flag(Some("1")));
        assert!(!EnvironmentDescriptor::parse_mock_flag(Some("")));
        assert!(!EnvironmentDescriptor::parse_mock_flag(None));
    }

    #[test]
    fn serializes_node_environment_as_string() {
        let env = EnvironmentDescriptor::new("edge", "0.1.0");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["node_environment"], "development");
        assert_eq!(json["browser_target"], "edge");
    }
}
