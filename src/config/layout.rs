//! Project layout.
//!
//! Every path in a build plan is anchored at the extension project's root
//! directory, the one holding `package.json`, `src/` and `build/`.

use std::path::{Path, PathBuf};

/// Name of the package manifest at the project root.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Name of the dotenv file at the project root.
pub const ENV_FILE: &str = ".env";

/// Text substituted for values the caller did not provide.
pub const UNDEFINED: &str = "undefined";

/// Directory layout of a browser extension project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root`. The path is used as given.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discover the project root by walking up from `start`.
    ///
    /// Looks for:
    /// 1. `package.json` (primary indicator)
    /// 2. `.git` directory (fallback)
    ///
    /// Falls back to `start` itself when neither is found.
    pub fn discover(start: &Path) -> Self {
        Self::new(find_project_root(start).unwrap_or_else(|| start.to_path_buf()))
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/src`, holding the HTML page templates.
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// `<root>/src/js`, the first module search path.
    pub fn scripts_dir(&self) -> PathBuf {
        self.src_dir().join("js")
    }

    /// `<root>/src/css`, the stylesheet include path.
    pub fn styles_dir(&self) -> PathBuf {
        self.src_dir().join("css")
    }

    /// `<root>/src/images`, target of the `images` alias.
    pub fn images_dir(&self) -> PathBuf {
        self.src_dir().join("images")
    }

    /// `<root>/build/<browser>`. A missing browser becomes `undefined`.
    pub fn build_dir(&self, browser: Option<&str>) -> PathBuf {
        self.root.join("build").join(browser.unwrap_or(UNDEFINED))
    }

    /// `<root>/src/<page>.html`.
    pub fn page_template(&self, page: &str) -> PathBuf {
        self.src_dir().join(format!("{}.html", page))
    }

    /// `<root>/package.json`.
    pub fn package_manifest(&self) -> PathBuf {
        self.root.join(PACKAGE_MANIFEST)
    }

    /// `<root>/.env`.
    pub fn env_file(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }
}

/// Find the project root by walking up from `start`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(PACKAGE_MANIFEST).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}
