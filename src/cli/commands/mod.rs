//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Project discovery and `.env`
//! selection happen once, in [`CommandContext`].

pub mod completions;
pub mod dispatcher;
pub mod env;
pub mod plan;
pub mod schema;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult, EnvFileChoice};
