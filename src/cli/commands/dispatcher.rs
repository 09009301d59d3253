//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the project inputs every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, PlanArgs, TargetArgs};
use crate::config::{EnvLayer, EnvLayerStack, ProjectLayout};
use crate::environment::{PackageManifest, ResolvedEnvironment};
use crate::error::{BxplanError, Result};
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Which `.env` file, if any, feeds the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileChoice {
    /// `<project>/.env` if it exists.
    ProjectDefault,
    /// A file the user named; it must exist.
    Explicit(PathBuf),
    /// No file.
    Disabled,
}

/// Project inputs shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    layout: ProjectLayout,
    env_file: EnvFileChoice,
    /// Replaces the process environment snapshot when set.
    variables: Option<EnvLayer>,
}

impl CommandContext {
    /// Create a context, discovering the project root from `start`.
    pub fn new(start: &Path, env_file: EnvFileChoice) -> Self {
        Self {
            layout: ProjectLayout::discover(start),
            env_file,
            variables: None,
        }
    }

    /// Read variables from `layer` instead of the process environment.
    /// The `.env` file still sits underneath.
    pub fn with_variables(mut self, layer: EnvLayer) -> Self {
        self.variables = Some(layer);
        self
    }

    /// Build a context from global CLI flags.
    pub fn from_cli(cli: &Cli, start: &Path) -> Self {
        let env_file = match (&cli.env_file, cli.no_env_file) {
            (_, true) => EnvFileChoice::Disabled,
            (Some(path), false) => EnvFileChoice::Explicit(path.clone()),
            (None, false) => EnvFileChoice::ProjectDefault,
        };
        Self::new(start, env_file)
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn env_file(&self) -> &EnvFileChoice {
        &self.env_file
    }

    /// Layered variables: the `.env` file under the process environment.
    pub fn environment(&self) -> Result<EnvLayerStack> {
        let top = self
            .variables
            .clone()
            .unwrap_or_else(EnvLayer::from_process);
        match &self.env_file {
            EnvFileChoice::Disabled => EnvLayerStack::over_env_file(None, top),
            EnvFileChoice::ProjectDefault => {
                EnvLayerStack::over_env_file(Some(&self.layout.env_file()), top)
            }
            EnvFileChoice::Explicit(path) => {
                if !path.is_file() {
                    return Err(BxplanError::EnvFileParse {
                        path: path.clone(),
                        message: "file not found".to_string(),
                    });
                }
                EnvLayerStack::over_env_file(Some(path), top)
            }
        }
    }

    /// Resolve one environment descriptor per requested browser.
    pub fn resolve_environments(&self, target: &TargetArgs) -> Result<Vec<ResolvedEnvironment>> {
        let env = self.environment()?;
        let manifest = PackageManifest::load_optional(&self.layout.package_manifest())?;
        Ok(ResolvedEnvironment::resolve_all(
            &target.to_flags(),
            &env,
            manifest.as_ref(),
        ))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Plan(args)) => {
                let cmd = super::plan::PlanCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Env(args)) => {
                let cmd = super::env::EnvCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Schema) => super::schema::SchemaCommand.execute(ui),
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::plan::PlanCommand::new(self.context.clone(), PlanArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
