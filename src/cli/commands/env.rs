//! Env command implementation.
//!
//! The `bxplan env` command shows the resolved environment descriptor and
//! the source of every value, without resolving a plan.

use std::fmt::Write as _;

use crate::cli::args::EnvArgs;
use crate::environment::ResolvedEnvironment;
use crate::error::{BxplanError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The env command implementation.
pub struct EnvCommand {
    context: CommandContext,
    args: EnvArgs,
}

impl EnvCommand {
    /// Create a new env command.
    pub fn new(context: CommandContext, args: EnvArgs) -> Self {
        Self { context, args }
    }
}

/// One block per descriptor: a heading line, then indented `key: value (source)` lines.
fn report(resolved: &[ResolvedEnvironment]) -> String {
    let mut out = String::new();
    for r in resolved {
        let d = &r.descriptor;
        let s = &r.sources;
        let mock = d.use_local_mock_service.to_string();
        let rows = [
            ("browser", d.browser_target.as_deref(), s.browser_target.to_string()),
            ("mode", Some(d.node_environment.as_str()), s.node_environment.to_string()),
            ("local mock service", Some(mock.as_str()), s.use_local_mock_service.to_string()),
            ("version", d.package_version.as_deref(), s.package_version.to_string()),
        ];

        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", d.browser_target.as_deref().unwrap_or("(no browser)"));
        for (key, value, source) in rows {
            let _ = writeln!(out, "  {}: {} ({})", key, value.unwrap_or("unset"), source);
        }
    }
    out
}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolved = self.context.resolve_environments(&self.args.target)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&resolved)
                .map_err(|e| BxplanError::Other(e.into()))?;
            ui.emit(&json);
            return Ok(CommandResult::success());
        }

        ui.message(&format!("# {}", self.context.layout().root().display()));
        ui.emit(&report(&resolved));

        Ok(CommandResult::success())
    }
}
