//! Project configuration sources.
//!
//! This module handles the inputs that surround plan resolution:
//! - `.env` parsing in [`env_file`]
//! - Priority layering of variables in [`env_layer`]
//! - The project directory layout in [`layout`]
//!
//! # Example
//!
//! ```
//! use bxplan::config::{EnvLayerStack, ProjectLayout};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("package.json"), r#"{"version": "1.2.0"}"#).unwrap();
//! fs::write(temp.path().join(".env"), "USE_LOCAL_MOCO=true").unwrap();
//!
//! let layout = ProjectLayout::discover(temp.path());
//! let env = EnvLayerStack::standard(Some(&layout.env_file())).unwrap();
//! assert!(env.get("USE_LOCAL_MOCO").is_some());
//! ```

pub mod env_file;
pub mod env_layer;
pub mod layout;

pub use env_file::EnvFileParser;
pub use env_layer::{EnvLayer, EnvLayerStack, LayerOrigin};
pub use layout::{find_project_root, ProjectLayout, ENV_FILE, PACKAGE_MANIFEST, UNDEFINED};
