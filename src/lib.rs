//! Bxplan - Build plan resolver for browser-extension bundles.
//!
//! Bxplan turns a small environment descriptor (target browser, build mode,
//! mock service flag and package version) into a complete, deterministic
//! bundler configuration for a web extension, printed as JSON or YAML.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Project layout and `.env` layering
//! - [`environment`] - Environment descriptor resolution
//! - [`error`] - Error types and result aliases
//! - [`plan`] - Build plan types, resolution and rendering
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use bxplan::config::ProjectLayout;
//! use bxplan::environment::{EnvironmentDescriptor, NodeEnvironment};
//! use bxplan::plan::resolve;
//!
//! let env = EnvironmentDescriptor::new("chrome", "1.2.0")
//!     .with_node_environment(NodeEnvironment::Production);
//! let plan = resolve(&env, &ProjectLayout::new("/work/ext"));
//!
//! assert_eq!(plan.output.filename, "[name].1.2.0.js");
//! assert_eq!(plan.archive().unwrap().filename, "moco-bx-chrome-v1.2.0.zip");
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod plan;
pub mod ui;

pub use error::{BxplanError, Result};
