//! Writer-backed UI.

use std::io::Write;

use super::{BxplanTheme, OutputMode, StatusKind, UserInterface};

/// Writes command output to `out` and status lines to `status`.
///
/// Write failures are ignored: a closed pipe on either stream must not
/// turn a resolved plan into an error.
pub struct StreamUI<O: Write, E: Write> {
    out: O,
    status: E,
    theme: BxplanTheme,
    mode: OutputMode,
}

impl<O: Write, E: Write> StreamUI<O, E> {
    pub fn with_writers(out: O, status: E, theme: BxplanTheme, mode: OutputMode) -> Self {
        Self {
            out,
            status,
            theme,
            mode,
        }
    }

    /// Give back the writers, for inspecting what was written.
    pub fn into_writers(self) -> (O, E) {
        (self.out, self.status)
    }

    fn status_line(&mut self, line: &str) {
        writeln!(self.status, "{}", line).ok();
    }

    fn status_kind(&mut self, kind: StatusKind, msg: &str) {
        let line = self.theme.status(kind, msg);
        self.status_line(&line);
    }
}

impl<O: Write, E: Write> UserInterface for StreamUI<O, E> {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn emit(&mut self, text: &str) {
        writeln!(self.out, "{}", text.trim_end_matches('\n')).ok();
        self.out.flush().ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.status_line(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.status_kind(StatusKind::Success, msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        self.status_kind(StatusKind::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.status_kind(StatusKind::Error, msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            let line = format!("\n{}", self.theme.header(title));
            self.status_line(&line);
        }
    }

    fn show_field(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            let line = self.theme.field(key, value);
            self.status_line(&line);
        }
    }
}
