//! Status line styling.

use console::Style;

/// Kind of status line; each kind has its own marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

impl StatusKind {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

/// Styles for the status lines written to stderr.
#[derive(Debug, Clone)]
pub struct BxplanTheme {
    success: Style,
    warning: Style,
    error: Style,
    header: Style,
    key: Style,
    value: Style,
}

impl BxplanTheme {
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            header: Style::new().cyan().bold(),
            key: Style::new().bold(),
            value: Style::new().dim(),
        }
    }

    /// No styling at all, for pipes, CI and `--no-color`.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            key: Style::new(),
            value: Style::new(),
        }
    }

    /// Colored when [`should_use_colors`] allows it.
    pub fn for_terminal() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// `<marker> <msg>` in the style of `kind`.
    pub fn status(&self, kind: StatusKind, msg: &str) -> String {
        let style = match kind {
            StatusKind::Success => &self.success,
            StatusKind::Warning => &self.warning,
            StatusKind::Error => &self.error,
        };
        style
            .apply_to(format!("{} {}", kind.marker(), msg))
            .to_string()
    }

    pub fn header(&self, title: &str) -> String {
        self.header.apply_to(title).to_string()
    }

    /// Indented `key: value` line.
    pub fn field(&self, key: &str, value: &str) -> String {
        format!(
            "  {} {}",
            self.key.apply_to(format!("{}:", key)),
            self.value.apply_to(value)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stderr().is_term()
}
