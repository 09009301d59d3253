//! Environment resolution.
//!
//! Builds an [`EnvironmentDescriptor`] from command-line flags, an
//! [`EnvironmentProvider`] and the package manifest. Each field follows its
//! own priority chain:
//!
//! | Field | Chain |
//! |---|---|
//! | browser target | `--browser` flag, `BXPLAN_BROWSER`, unset |
//! | node environment | `--mode` flag, `NODE_ENV`, development |
//! | local mock service | `USE_LOCAL_MOCO`, false |
//! | package version | `--package-version` flag, `npm_package_version`, `package.json`, unset |

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::descriptor::{EnvironmentDescriptor, NodeEnvironment};
use super::package::PackageManifest;
use super::provider::{EnvironmentProvider, ProvidedValue};
use crate::config::LayerOrigin;

/// Variable naming the browser target when no flag is given.
pub const BROWSER_VAR: &str = "BXPLAN_BROWSER";
/// Variable holding the node environment mode.
pub const NODE_ENV_VAR: &str = "NODE_ENV";
/// Variable holding the raw local-mock-service flag.
pub const MOCK_SERVICE_VAR: &str = "USE_LOCAL_MOCO";
/// Variable npm sets to the running package's version.
pub const PACKAGE_VERSION_VAR: &str = "npm_package_version";

/// How a descriptor field was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Explicitly set on the command line.
    Flag,
    /// Read from a variable.
    Variable { name: String, origin: LayerOrigin },
    /// Read from the package manifest.
    PackageManifest(PathBuf),
    /// Nothing supplied; the default applies.
    Default,
}

impl ValueSource {
    fn variable(name: &str, provided: &ProvidedValue) -> Self {
        Self::Variable {
            name: name.to_string(),
            origin: provided.origin.clone(),
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "command-line flag"),
            Self::Variable { name, origin } => write!(f, "${} ({})", name, origin),
            Self::PackageManifest(path) => write!(f, "{}", path.display()),
            Self::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct BuildFlags {
    /// Browser targets; one descriptor is resolved per entry.
    pub browsers: Vec<String>,
    /// Node environment mode.
    pub mode: Option<String>,
    /// Package version.
    pub package_version: Option<String>,
}

/// Where each descriptor field came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorSources {
    pub browser_target: ValueSource,
    pub node_environment: ValueSource,
    pub use_local_mock_service: ValueSource,
    pub package_version: ValueSource,
}

/// A resolved descriptor with the source of every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnvironment {
    pub descriptor: EnvironmentDescriptor,
    pub sources: DescriptorSources,
}

impl ResolvedEnvironment {
    /// Resolve one descriptor per requested browser.
    ///
    /// With no `--browser` flags a single descriptor is resolved from the
    /// remaining chain.
    ///
    /// # Example
    ///
    /// ```
    /// use bxplan::environment::{BuildFlags, ResolvedEnvironment, StaticEnvironment, ValueSource};
    ///
    /// let flags = BuildFlags {
    ///     browsers: vec!["chrome".into(), "firefox".into()],
    ///     mode: Some("production".into()),
    ///     package_version: Some("1.2.0".into()),
    /// };
    /// let env = StaticEnvironment::new().with("USE_LOCAL_MOCO", "true");
    ///
    /// let resolved = ResolvedEnvironment::resolve_all(&flags, &env, None);
    /// assert_eq!(resolved.len(), 2);
    /// assert_eq!(resolved[1].descriptor.browser_target.as_deref(), Some("firefox"));
    /// assert!(resolved[0].descriptor.use_local_mock_service);
    /// assert_eq!(resolved[0].sources.node_environment, ValueSource::Flag);
    /// ```
    pub fn resolve_all(
        flags: &BuildFlags,
        provider: &dyn EnvironmentProvider,
        manifest: Option<&PackageManifest>,
    ) -> Vec<Self> {
        if flags.browsers.is_empty() {
            return vec![Self::resolve(None, flags, provider, manifest)];
        }

        flags
            .browsers
            .iter()
            .map(|browser| Self::resolve(Some(browser), flags, provider, manifest))
            .collect()
    }

    /// Resolve a descriptor for a single browser flag.
    pub fn resolve(
        browser: Option<&str>,
        flags: &BuildFlags,
        provider: &dyn EnvironmentProvider,
        manifest: Option<&PackageManifest>,
    ) -> Self {
        let (browser_target, browser_source) = match browser {
            Some(name) => (Some(name.to_string()), ValueSource::Flag),
            None => match provider.provide(BROWSER_VAR) {
                Some(v) => {
                    let source = ValueSource::variable(BROWSER_VAR, &v);
                    (Some(v.value), source)
                }
                None => (None, ValueSource::Default),
            },
        };

        let (node_environment, mode_source) = match flags.mode.as_deref() {
            Some(mode) => (NodeEnvironment::parse(Some(mode)), ValueSource::Flag),
            None => match provider.provide(NODE_ENV_VAR) {
                Some(v) => (
                    NodeEnvironment::parse(Some(&v.value)),
                    ValueSource::variable(NODE_ENV_VAR, &v),
                ),
                None => (NodeEnvironment::default(), ValueSource::Default),
            },
        };

        let (use_local_mock_service, mock_source) = match provider.provide(MOCK_SERVICE_VAR) {
            Some(v) => (
                EnvironmentDescriptor::parse_mock_flag(Some(&v.value)),
                ValueSource::variable(MOCK_SERVICE_VAR, &v),
            ),
            None => (false, ValueSource::Default),
        };

        let (package_version, version_source) = Self::resolve_version(flags, provider, manifest);

        tracing::debug!(
            browser = ?browser_target,
            mode = %node_environment,
            mock = use_local_mock_service,
            version = ?package_version,
            "Resolved environment descriptor"
        );

        Self {
            descriptor: EnvironmentDescriptor {
                browser_target,
                node_environment,
                use_local_mock_service,
                package_version,
            },
            sources: DescriptorSources {
                browser_target: browser_source,
                node_environment: mode_source,
                use_local_mock_service: mock_source,
                package_version: version_source,
            },
        }
    }

    fn resolve_version(
        flags: &BuildFlags,
        provider: &dyn EnvironmentProvider,
        manifest: Option<&PackageManifest>,
    ) -> (Option<String>, ValueSource) {
        if let Some(version) = &flags.package_version {
            return (Some(version.clone()), ValueSource::Flag);
        }

        if let Some(v) = provider.provide(PACKAGE_VERSION_VAR) {
            let source = ValueSource::variable(PACKAGE_VERSION_VAR, &v);
            return (Some(v.value), source);
        }

        if let Some(manifest) = manifest {
            if let Some(version) = &manifest.version {
                return (
                    Some(version.clone()),
                    ValueSource::PackageManifest(manifest.path.clone()),
                );
            }
        }

        (None, ValueSource::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;

    fn manifest(version: &str) -> PackageManifest {
        PackageManifest {
            path: PathBuf::from("/ext/package.json"),
            name: Some("moco-bx".into()),
            version: Some(version.into()),
        }
    }

    #[test]
    fn flags_take_highest_priority() {
        let flags = BuildFlags {
            browsers: vec!["chrome".into()],
            mode: Some("production".into()),
            package_version: Some("3.0.0".into()),
        };
        let env = StaticEnvironment::new()
            .with(BROWSER_VAR, "firefox")
            .with(NODE_ENV_VAR, "development")
            .with(PACKAGE_VERSION_VAR, "2.0.0");

        let resolved = ResolvedEnvironment::resolve(Some("chrome"), &flags, &env, None);

        assert_eq!(resolved.descriptor.browser_target.as_deref(), Some("chrome"));
        assert!(resolved.descriptor.is_production());
        assert_eq!(resolved.descriptor.package_version.as_deref(), Some("3.0.0"));
        assert_eq!(resolved.sources.browser_target, ValueSource::Flag);
        assert_eq!(resolved.sources.package_version, ValueSource::Flag);
    }

    #[test]
    fn variables_second_priority() {
        let env = StaticEnvironment::new()
            .with(BROWSER_VAR, "firefox")
            .with(NODE_ENV_VAR, "production")
            .with(PACKAGE_VERSION_VAR, "2.0.0");

        let resolved =
            ResolvedEnvironment::resolve(None, &BuildFlags::default(), &env, Some(&manifest("1.0.0")));

        assert_eq!(resolved.descriptor.browser_target.as_deref(), Some("firefox"));
        assert!(resolved.descriptor.is_production());
        assert_eq!(resolved.descriptor.package_version.as_deref(), Some("2.0.0"));
        assert!(matches!(
            resolved.sources.node_environment,
            ValueSource::Variable { ref name, .. } if name == NODE_ENV_VAR
        ));
    }

    #[test]
    fn manifest_version_third_priority() {
        let resolved = ResolvedEnvironment::resolve(
            None,
            &BuildFlags::default(),
            &StaticEnvironment::new(),
            Some(&manifest("1.2.0")),
        );

        assert_eq!(resolved.descriptor.package_version.as_deref(), Some("1.2.0"));
        assert_eq!(
            resolved.sources.package_version,
            ValueSource::PackageManifest(PathBuf::from("/ext/package.json"))
        );
    }

    #[test]
    fn defaults_when_nothing_supplied() {
        let resolved = ResolvedEnvironment::resolve(
            None,
            &BuildFlags::default(),
            &StaticEnvironment::new(),
            None,
        );

        assert_eq!(resolved.descriptor.browser_target, None);
        assert_eq!(resolved.descriptor.package_version, None);
        assert_eq!(
            resolved.descriptor.node_environment,
            NodeEnvironment::Development
        );
        assert!(!resolved.descriptor.use_local_mock_service);
        assert_eq!(resolved.sources.browser_target, ValueSource::Default);
        assert_eq!(resolved.sources.use_local_mock_service, ValueSource::Default);
    }

    #[test]
    fn empty_node_env_means_development() {
        let env = StaticEnvironment::new().with(NODE_ENV_VAR, "");
        let resolved = ResolvedEnvironment::resolve(None, &BuildFlags::default(), &env, None);
        assert_eq!(
            resolved.descriptor.node_environment,
            NodeEnvironment::Development
        );
    }

    #[test]
    fn mock_flag_false_and_garbage() {
        for raw in ["false", "yes", ""] {
            let env = StaticEnvironment::new().with(MOCK_SERVICE_VAR, raw);
            let resolved = ResolvedEnvironment::resolve(None, &BuildFlags::default(), &env, None);
            assert!(!resolved.descriptor.use_local_mock_service, "raw = {raw:?}");
        }
    }

    #[test]
    fn resolve_all_without_browsers_yields_one() {
        let env = StaticEnvironment::new().with(BROWSER_VAR, "edge");
        let resolved = ResolvedEnvironment::resolve_all(&BuildFlags::default(), &env, None);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].descriptor.browser_target.as_deref(), Some("edge"));
    }

    #[test]
    fn resolve_all_keeps_flag_order() {
        let flags = BuildFlags {
            browsers: vec!["firefox".into(), "chrome".into(), "edge".into()],
            ..Default::default()
        };
        let resolved = ResolvedEnvironment::resolve_all(&flags, &StaticEnvironment::new(), None);
        let names: Vec<_> = resolved
            .iter()
            .map(|r| r.descriptor.browser_target.clone().unwrap())
            .collect();
        assert_eq!(names, ["firefox", "chrome", "edge"]);
    }

    #[test]
    fn source_display() {
        assert_eq!(ValueSource::Flag.to_string(), "command-line flag");
        assert_eq!(ValueSource::Default.to_string(), "default");
        assert_eq!(
            ValueSource::Variable {
                name: "NODE_ENV".into(),
                origin: LayerOrigin::Process
            }
            .to_string(),
            "$NODE_ENV (process environment)"
        );
    }
}
