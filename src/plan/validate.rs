//! Input validation and plan invariants.
//!
//! [`super::resolve`] accepts any descriptor. These checks are what
//! [`super::resolve_strict`] and the CLI layer on top.

use std::collections::BTreeSet;

use super::types::{BuildPlan, Entry, PluginStep};
use crate::environment::{EnvironmentDescriptor, BROWSER_VAR, PACKAGE_VERSION_VAR};
use crate::error::{BxplanError, Result};

/// Reject descriptors that would produce a semantically wrong plan.
///
/// # Example
///
/// ```
/// use bxplan::environment::EnvironmentDescriptor;
/// use bxplan::plan::validate;
///
/// assert!(validate(&EnvironmentDescriptor::new("chrome", "1.2.0")).is_ok());
/// assert!(validate(&EnvironmentDescriptor::default()).is_err());
/// ```
pub fn validate(env: &EnvironmentDescriptor) -> Result<()> {
    let browser = env
        .browser_target
        .as_deref()
        .ok_or_else(|| BxplanError::MissingField {
            field: "browser_target".to_string(),
            hint: format!("pass --browser or set {}", BROWSER_VAR),
        })?;
    validate_browser(browser)?;

    let version = env
        .package_version
        .as_deref()
        .ok_or_else(|| BxplanError::MissingField {
            field: "package_version".to_string(),
            hint: format!(
                "pass --package-version, set {}, or declare a version in package.json",
                PACKAGE_VERSION_VAR
            ),
        })?;
    validate_version(version)
}

fn validate_browser(browser: &str) -> Result<()> {
    let invalid = |message: &str| BxplanError::InvalidField {
        field: "browser_target".to_string(),
        message: format!("'{}' {}", browser, message),
    };

    if browser.trim().is_empty() {
        return Err(invalid("is blank"));
    }
    if browser.contains(['/', '\\']) || browser == "." || browser == ".." {
        return Err(invalid("must name a single directory"));
    }
    Ok(())
}

fn validate_version(version: &str) -> Result<()> {
    let invalid = |message: &str| BxplanError::InvalidField {
        field: "package_version".to_string(),
        message: format!("'{}' {}", version, message),
    };

    if version.trim().is_empty() {
        return Err(invalid("is blank"));
    }
    if version.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    Ok(())
}

/// Check the structural invariants every resolved plan must satisfy:
///
/// - entries minus `content` match the HTML template steps exactly
/// - the archive step appears, last and once, only in production
/// - source maps are disabled only in production
pub fn check_invariants(plan: &BuildPlan, env: &EnvironmentDescriptor) -> Result<()> {
    let violation = |message: String| BxplanError::InvalidField {
        field: "plan".to_string(),
        message,
    };

    let pages: BTreeSet<&str> = plan
        .entry
        .names()
        .filter(|name| *name != Entry::Content.name())
        .collect();
    let templates: BTreeSet<&str> = plan.html_templates().map(|t| t.entry.as_str()).collect();
    if pages != templates {
        return Err(violation(format!(
            "page entries {:?} do not match html templates {:?}",
            pages, templates
        )));
    }

    let archives = plan
        .plugins
        .iter()
        .filter(|p| matches!(p, PluginStep::Archive(_)))
        .count();
    let archive_last = matches!(plan.plugins.last(), Some(PluginStep::Archive(_)));
    match (env.is_production(), archives, archive_last) {
        (true, 1, true) | (false, 0, _) => {}
        (production, count, _) => {
            return Err(violation(format!(
                "{} archive step(s) for production = {}",
                count, production
            )));
        }
    }

    if plan.devtool.is_none() != env.is_production() {
        return Err(violation(format!(
            "devtool {:?} inconsistent with mode '{}'",
            plan.devtool, plan.mode
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectLayout;
    use crate::environment::NodeEnvironment;
    use crate::plan::resolve;

    #[test]
    fn missing_browser_is_missing_field() {
        let env = EnvironmentDescriptor {
            package_version: Some("1.0.0".into()),
            ..Default::default()
        };
        let err = validate(&env).unwrap_err();
        assert!(matches!(err, BxplanError::MissingField { ref field, .. } if field == "browser_target"));
    }

    #[test]
    fn missing_version_is_missing_field() {
        let env = EnvironmentDescriptor {
            browser_target: Some("chrome".into()),
            ..Default::default()
        };
        let err = validate(&env).unwrap_err();
        assert!(err.to_string().contains("npm_package_version"));
    }

    #[test]
    fn blank_values_are_invalid() {
        assert!(matches!(
            validate(&EnvironmentDescriptor::new("  ", "1.0.0")),
            Err(BxplanError::InvalidField { .. })
        ));
        assert!(matches!(
            validate(&EnvironmentDescriptor::new("chrome", "")),
            Err(BxplanError::InvalidField { .. })
        ));
    }

    #[test]
    fn browser_must_be_single_directory() {
        for browser in ["a/b", "..", "c\\d"] {
            assert!(
                validate(&EnvironmentDescriptor::new(browser, "1.0.0")).is_err(),
                "{browser} accepted"
            );
        }
    }

    #[test]
    fn version_with_whitespace_is_invalid() {
        assert!(validate(&EnvironmentDescriptor::new("chrome", "1.0 beta")).is_err());
    }

    #[test]
    fn resolved_plans_satisfy_invariants() {
        let layout = ProjectLayout::new("/ext");
        for mode in [
            NodeEnvironment::Development,
            NodeEnvironment::Production,
            NodeEnvironment::Other("test".into()),
        ] {
            let env = EnvironmentDescriptor::new("chrome", "1.0.0").with_node_environment(mode);
            check_invariants(&resolve(&env, &layout), &env).unwrap();
        }
    }

    #[test]
    fn detects_archive_outside_production() {
        let layout = ProjectLayout::new("/ext");
        let production = EnvironmentDescriptor::new("chrome", "1.0.0")
            .with_node_environment(NodeEnvironment::Production);
        let development = EnvironmentDescriptor::new("chrome", "1.0.0");

        let mut plan = resolve(&production, &layout);
        plan.devtool = Some("cheap-module-source-map".into());
        assert!(check_invariants(&plan, &development).is_err());
    }

    #[test]
    fn detects_missing_page() {
        let layout = ProjectLayout::new("/ext");
        let env = EnvironmentDescriptor::new("chrome", "1.0.0");
        let mut plan = resolve(&env, &layout);
        plan.plugins.pop();
        let err = check_invariants(&plan, &env).unwrap_err();
        assert!(err.to_string().contains("html templates"));
    }
}
