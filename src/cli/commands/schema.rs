//! Schema command implementation.
//!
//! The `bxplan schema` command prints the JSON Schema of a rendered plan,
//! for validating plans in bundler driver scripts.

use crate::error::Result;
use crate::plan::plan_schema;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.emit(&plan_schema()?);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn emits_schema_json() {
        let mut ui = MockUI::new();
        let result = SchemaCommand.execute(&mut ui).unwrap();

        assert!(result.success);
        let schema: serde_json::Value = serde_json::from_str(&ui.emitted()[0]).unwrap();
        assert!(schema["properties"].get("entry").is_some());
    }
}
