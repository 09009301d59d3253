//! Environment descriptor construction.
//!
//! Determines the browser target, node environment, local mock service flag
//! and package version that a build plan is resolved for. Variables are
//! read through an [`EnvironmentProvider`] so resolution stays testable.

pub mod descriptor;
pub mod package;
pub mod provider;
pub mod resolver;

pub use descriptor::{EnvironmentDescriptor, NodeEnvironment};
pub use package::PackageManifest;
pub use provider::{EnvironmentProvider, ProcessEnvironment, ProvidedValue, StaticEnvironment};
pub use resolver::{
    BuildFlags, DescriptorSources, ResolvedEnvironment, ValueSource, BROWSER_VAR,
    MOCK_SERVICE_VAR, NODE_ENV_VAR, PACKAGE_VERSION_VAR,
};
