//! Package manifest lookup.
//!
//! The package version is read once from `package.json` when neither a flag
//! nor `npm_package_version` supplies it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BxplanError, Result};

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<String>,
    version: Option<String>,
}

/// The fields of `package.json` that plan resolution cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    /// Path the manifest was read from.
    pub path: PathBuf,
    /// Package name, if declared.
    pub name: Option<String>,
    /// Package version, if declared.
    pub version: Option<String>,
}

impl PackageManifest {
    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| BxplanError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            name: raw.name,
            version: raw.version,
        })
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BxplanError::ManifestRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Read a manifest if the file exists.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.is_file() {
            Self::load(path).map(Some)
        } else {
            tracing::debug!("No package manifest at {}", path.display());
            Ok(None)
        }
    }
}
