//! Output verbosity.

/// How much status output accompanies command output.
///
/// Command output itself is printed in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Status messages plus the resolved plan summary.
    Verbose,
    /// Status messages.
    #[default]
    Normal,
    /// Warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Mode selected by the global `--verbose` and `--quiet` flags.
    /// `--quiet` wins when both are given.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Whether the plan summary (bundles, devtool, archive) is shown.
    pub fn shows_details(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether status and success lines are shown.
    pub fn shows_status(self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
