//! Build plan data model.
//!
//! Field names serialize to the shape a bundler driver expects: `entry`,
//! `output`, `module.rules`, `plugins`, `resolve`, `mode` and `devtool`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use regex::Regex;
use schemars::JsonSchema;
use serde::Serialize;

use crate::error::{BxplanError, Result};

/// Placeholder the bundler replaces with the entry name.
pub const NAME_PLACEHOLDER: &str = "[name]";

/// A named source module that becomes an independent output bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Entry {
    Background,
    Content,
    Popup,
    Options,
}

impl Entry {
    /// Every entry, in declaration order.
    pub const ALL: [Entry; 4] = [Self::Background, Self::Content, Self::Popup, Self::Options];

    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Popup => "popup",
            Self::Options => "options",
        }
    }

    /// Whether the entry gets its own HTML page. The content script runs
    /// inside web pages and has none.
    pub fn has_page(self) -> bool {
        !matches!(self, Self::Content)
    }

    /// Source module, relative to the project root.
    pub fn source(self) -> String {
        format!("./src/js/{}.js", self.name())
    }

    /// Entries that get an HTML page, in declaration order.
    pub fn pages() -> impl Iterator<Item = Entry> {
        Self::ALL.into_iter().filter(|e| e.has_page())
    }
}

/// Mapping from entry name to source module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct EntryMap(BTreeMap<String, String>);

impl EntryMap {
    /// The fixed entry map. Identical for every environment.
    pub fn standard() -> Self {
        Self(
            Entry::ALL
                .into_iter()
                .map(|e| (e.name().to_string(), e.source()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where bundles are written and how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    /// Output directory.
    pub path: PathBuf,
    /// Public URL prefix for emitted assets.
    pub public_path: String,
    /// Bundle filename pattern containing `[name]`.
    pub filename: String,
}

impl OutputDescriptor {
    /// Concrete bundle filename for an entry.
    ///
    /// ```
    /// use bxplan::plan::OutputDescriptor;
    ///
    /// let output = OutputDescriptor {
    ///     path: "/ext/build/chrome".into(),
    ///     public_path: String::new(),
    ///     filename: "[name].1.2.0.js".into(),
    /// };
    /// assert_eq!(output.filename_for("background"), "background.1.2.0.js");
    /// ```
    pub fn filename_for(&self, entry: &str) -> String {
        self.filename.replace(NAME_PLACEHOLDER, entry)
    }
}

/// One loader in a transform chain.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct LoaderSpec {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }

    pub fn with_options(loader: impl Into<String>, options: serde_json::Value) -> Self {
        Self {
            loader: loader.into(),
            options: Some(options),
        }
    }
}

/// A file-pattern-matched processing chain.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TransformRule {
    /// Regular expression matched against module paths.
    pub test: String,
    /// Loaders, applied last to first by the bundler.
    #[serde(rename = "use")]
    pub loaders: Vec<LoaderSpec>,
    /// Regular expressions for paths the rule never applies to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl TransformRule {
    /// Whether the rule applies to a module path.
    pub fn applies_to(&self, path: &str) -> Result<bool> {
        if !compile(&self.test)?.is_match(path) {
            return Ok(false);
        }
        for pattern in &self.exclude {
            if compile(pattern)?.is_match(path) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Names of the loaders in the chain.
    pub fn loader_names(&self) -> Vec<&str> {
        self.loaders.iter().map(|l| l.loader.as_str()).collect()
    }
}

/// Module transformation settings.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ModuleOptions {
    pub rules: Vec<TransformRule>,
}

/// Instantiate an HTML page for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct HtmlTemplateStep {
    /// Entry the page belongs to.
    pub entry: String,
    /// Template source.
    pub template: PathBuf,
    /// Rendered page location.
    pub filename: PathBuf,
    /// Bundles injected into the page.
    pub chunks: Vec<String>,
}

/// Zip the build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ArchiveStep {
    /// Archive filename.
    pub filename: String,
    /// Regular expressions for files left out of the archive.
    pub exclude: Vec<String>,
}

impl ArchiveStep {
    /// Whether an emitted file goes into the archive.
    pub fn includes(&self, path: &str) -> Result<bool> {
        for pattern in &self.exclude {
            if compile(pattern)?.is_match(path) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A build-lifecycle hook step.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginStep {
    /// Empty the output directory, keeping files matched by the negated
    /// patterns.
    CleanOutput {
        #[serde(rename = "cleanAfterEveryBuildPatterns")]
        keep_patterns: Vec<String>,
    },
    /// Build-time constants, each value a JSON literal.
    Define {
        definitions: BTreeMap<String, serde_json::Value>,
    },
    /// Pull compiled stylesheets into standalone files.
    ExtractCss {
        filename: String,
        #[serde(rename = "chunkFilename")]
        chunk_filename: String,
    },
    HtmlTemplate(HtmlTemplateStep),
    Archive(ArchiveStep),
}

impl PluginStep {
    /// Short name used in logs and listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CleanOutput { .. } => "clean-output",
            Self::Define { .. } => "define",
            Self::ExtractCss { .. } => "extract-css",
            Self::HtmlTemplate(_) => "html-template",
            Self::Archive(_) => "archive",
        }
    }

    pub fn as_html_template(&self) -> Option<&HtmlTemplateStep> {
        match self {
            Self::HtmlTemplate(step) => Some(step),
            _ => None,
        }
    }

    pub fn as_archive(&self) -> Option<&ArchiveStep> {
        match self {
            Self::Archive(step) => Some(step),
            _ => None,
        }
    }
}

/// Module resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ResolveOptions {
    /// Directories searched for bare imports, in order.
    pub modules: Vec<PathBuf>,
    /// Import prefix aliases.
    pub alias: BTreeMap<String, PathBuf>,
}

/// The complete resolved configuration consumed by the bundler.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BuildPlan {
    pub entry: EntryMap,
    pub output: OutputDescriptor,
    pub module: ModuleOptions,
    pub plugins: Vec<PluginStep>,
    pub resolve: ResolveOptions,
    pub mode: String,
    /// Source map style. Absent in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,
}

impl BuildPlan {
    /// The HTML template steps, in plugin order.
    pub fn html_templates(&self) -> impl Iterator<Item = &HtmlTemplateStep> {
        self.plugins.iter().filter_map(PluginStep::as_html_template)
    }

    /// The archive step, if the plan packages its output.
    pub fn archive(&self) -> Option<&ArchiveStep> {
        self.plugins.iter().find_map(PluginStep::as_archive)
    }

    /// Value of a build-time constant.
    pub fn definition(&self, key: &str) -> Option<&serde_json::Value> {
        self.plugins.iter().find_map(|p| match p {
            PluginStep::Define { definitions } => definitions.get(key),
            _ => None,
        })
    }

    /// Concrete bundle filename for every entry.
    pub fn bundle_filenames(&self) -> Vec<String> {
        self.entry
            .names()
            .map(|name| self.output.filename_for(name))
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| BxplanError::InvalidField {
        field: "pattern".to_string(),
        message: format!("'{}': {}", pattern, e),
    })
}
