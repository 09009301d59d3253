//! User-facing terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`StreamUI`], which writes command output and status lines to two
//!   separate writers, with [`TerminalUI`] and [`PlainUI`] as its process
//!   stream flavors
//! - [`MockUI`] for capturing output in tests
//!
//! Rendered plans and `env` reports go to stdout through
//! [`UserInterface::emit`] and are never suppressed. Status messages go to
//! stderr and follow the [`OutputMode`], so a plan can be piped straight
//! into a bundler driver.
//!
//! # Example
//!
//! ```
//! use bxplan::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Plan resolved");
//! ```

pub mod mock;
pub mod output;
pub mod stream;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use stream::StreamUI;
pub use terminal::{create_ui, is_ci, PlainUI, TerminalUI};
pub use theme::{should_use_colors, BxplanTheme, StatusKind};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Write command output (a rendered plan, a schema, a report) to stdout.
    fn emit(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message. Shown in every mode.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a `key: value` line.
    fn show_field(&mut self, key: &str, value: &str);
}
