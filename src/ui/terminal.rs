//! Process stream UIs.

use std::io::{self, Stderr, Stdout};

use console::Term;

use super::{BxplanTheme, OutputMode, StreamUI, UserInterface};

/// Styled UI on the terminal.
pub type TerminalUI = StreamUI<Term, Term>;

/// Unstyled UI on the process streams, for pipes and CI.
pub type PlainUI = StreamUI<Stdout, Stderr>;

impl StreamUI<Term, Term> {
    pub fn terminal(mode: OutputMode) -> Self {
        Self::with_writers(
            Term::stdout(),
            Term::stderr(),
            BxplanTheme::for_terminal(),
            mode,
        )
    }
}

impl StreamUI<Stdout, Stderr> {
    pub fn plain(mode: OutputMode) -> Self {
        Self::with_writers(io::stdout(), io::stderr(), BxplanTheme::plain(), mode)
    }
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Create the UI for the current process.
///
/// Falls back to [`PlainUI`] when not interactive or when stderr is not a
/// terminal.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stderr().is_term() {
        Box::new(TerminalUI::terminal(mode))
    } else {
        Box::new(PlainUI::plain(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ui_keeps_mode() {
        let ui = create_ui(false, OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn is_ci_does_not_panic() {
        let _ = is_ci();
    }
}
