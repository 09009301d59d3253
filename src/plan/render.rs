//! Plan serialization.

use std::fmt;
use std::str::FromStr;

use super::types::BuildPlan;
use crate::error::{BxplanError, Result};

/// Output format for rendered plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlanFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for PlanFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!("unknown plan format: {}", s)),
        }
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render a single plan.
pub fn render(plan: &BuildPlan, format: PlanFormat) -> Result<String> {
    render_value(plan, format)
}

/// Render several plans as one document: a JSON array or a YAML sequence.
///
/// A bundler driver accepts either a single configuration or a list.
pub fn render_many(plans: &[BuildPlan], format: PlanFormat) -> Result<String> {
    match plans {
        [single] => render(single, format),
        _ => render_value(&plans, format),
    }
}

/// JSON Schema describing a rendered plan.
pub fn plan_schema() -> Result<String> {
    let schema = schemars::schema_for!(BuildPlan);
    serde_json::to_string_pretty(&schema).map_err(|e| render_error(PlanFormat::Json, e))
}

fn render_value<T: serde::Serialize + ?Sized>(value: &T, format: PlanFormat) -> Result<String> {
    match format {
        PlanFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| render_error(format, e))
        }
        PlanFormat::Yaml => serde_yaml::to_string(value).map_err(|e| render_error(format, e)),
    }
}

fn render_error(format: PlanFormat, err: impl fmt::Display) -> BxplanError {
    BxplanError::Render {
        format: format.to_string(),
        message: err.to_string(),
    }
}
