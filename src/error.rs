//! Error types for bxplan operations.
//!
//! This module defines [`BxplanError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Plan resolution itself never fails; missing inputs degrade the plan
//! - Use `BxplanError` for input, environment and rendering failures
//! - Use `anyhow::Error` (via `BxplanError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bxplan operations.
#[derive(Debug, Error)]
pub enum BxplanError {
    /// A required descriptor field was not supplied.
    #[error("Missing required value '{field}': {hint}")]
    MissingField { field: String, hint: String },

    /// A descriptor field was supplied but cannot be used.
    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Failed to read or parse a `.env` file.
    #[error("Failed to read env file {path}: {message}")]
    EnvFileParse { path: PathBuf, message: String },

    /// Failed to read the package manifest.
    #[error("Failed to read package manifest {path}: {message}")]
    ManifestRead { path: PathBuf, message: String },

    /// Package manifest is not valid JSON or has a malformed version.
    #[error("Failed to parse package manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Failed to serialize a plan.
    #[error("Failed to render plan as {format}: {message}")]
    Render { format: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BxplanError {
    /// Whether this error was caused by caller input rather than the system.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidField { .. })
    }
}

/// Result type alias for bxplan operations.
pub type Result<T> = std::result::Result<T, BxplanError>;
