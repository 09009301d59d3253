//! Plan command implementation.
//!
//! The `bxplan plan` command resolves one build plan per browser target and
//! prints it for a bundler driver to consume.

use crate::cli::args::PlanArgs;
use crate::environment::EnvironmentDescriptor;
use crate::error::Result;
use crate::plan::{render_many, resolve_all, validate, BuildPlan};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The plan command implementation.
pub struct PlanCommand {
    context: CommandContext,
    args: PlanArgs,
}

impl PlanCommand {
    /// Create a new plan command.
    pub fn new(context: CommandContext, args: PlanArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &PlanArgs {
        &self.args
    }

    fn check(&self, env: &EnvironmentDescriptor, ui: &mut dyn UserInterface) -> Result<()> {
        match validate(env) {
            Ok(()) => Ok(()),
            Err(e) if self.args.permissive => {
                ui.warning(&e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn show_summary(&self, plans: &[BuildPlan], ui: &mut dyn UserInterface) {
        for plan in plans {
            ui.show_header(&plan.output.path.display().to_string());
            ui.show_field("mode", &plan.mode);
            ui.show_field("bundles", &plan.bundle_filenames().join(", "));
            ui.show_field("devtool", plan.devtool.as_deref().unwrap_or("none"));
            if let Some(archive) = plan.archive() {
                ui.show_field("archive", &archive.filename);
            }
        }
    }
}

impl Command for PlanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolved = self.context.resolve_environments(&self.args.target)?;

        let mut descriptors = Vec::with_capacity(resolved.len());
        for r in resolved {
            self.check(&r.descriptor, ui)?;
            descriptors.push(r.descriptor);
        }

        let plans = resolve_all(&descriptors, self.context.layout());
        let rendered = render_many(&plans, self.args.format)?;

        if ui.output_mode().shows_details() {
            self.show_summary(&plans, ui);
        }

        match &self.args.out {
            Some(path) => {
                std::fs::write(path, format!("{}\n", rendered.trim_end()))?;
                tracing::info!("Wrote {} plan(s) to {}", plans.len(), path.display());
                ui.success(&format!(
                    "Wrote {} plan(s) to {}",
                    plans.len(),
                    path.display()
                ));
            }
            None => ui.emit(&rendered),
        }

        Ok(CommandResult::success())
    }
}
