//! Build plan resolution.
//!
//! Given an [`EnvironmentDescriptor`](crate::environment::EnvironmentDescriptor)
//! and a [`ProjectLayout`](crate::config::ProjectLayout), produce the
//! complete configuration an external bundler consumes: entries, output
//! naming, transform rules, ordered plugin steps, module resolution, mode
//! and source map setting.
//!
//! - [`types`] - The plan data model
//! - [`resolver`] - Pure resolution of a plan from its inputs
//! - [`builder`] - Ordered plugin-list construction
//! - [`validate`] - Fail-fast input checks and plan invariants
//! - [`render`] - JSON, YAML and JSON Schema output

pub mod builder;
pub mod render;
pub mod resolver;
pub mod types;
pub mod validate;

pub use builder::PluginListBuilder;
pub use render::{plan_schema, render, render_many, PlanFormat};
pub use resolver::{
    archive_step, base_plugins, define_constants, html_template, output_descriptor, resolve,
    resolve_all, resolve_options, resolve_strict, transform_rules, ARCHIVE_PREFIX,
    DEPENDENCY_PATTERN, DEV_SOURCE_MAP, KEEP_PATTERNS, MOCK_SERVICE_CONSTANT, NODE_ENV_CONSTANT,
    SOURCE_MAP_PATTERN,
};
pub use types::{
    ArchiveStep, BuildPlan, Entry, EntryMap, HtmlTemplateStep, LoaderSpec, ModuleOptions,
    OutputDescriptor, PluginStep, ResolveOptions, TransformRule, NAME_PLACEHOLDER,
};
pub use validate::{check_invariants, validate};
