//! Build configuration resolution.
//!
//! [`resolve`] is a pure function of the descriptor and the project layout:
//! no I/O, no environment reads, no hidden state. Calling it twice with the
//! same input yields equal plans.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::json;

use super::builder::PluginListBuilder;
use super::types::{
    ArchiveStep, BuildPlan, Entry, EntryMap, HtmlTemplateStep, LoaderSpec, ModuleOptions,
    OutputDescriptor, PluginStep, ResolveOptions, TransformRule, NAME_PLACEHOLDER,
};
use super::validate::{check_invariants, validate};
use crate::config::{ProjectLayout, UNDEFINED};
use crate::environment::EnvironmentDescriptor;
use crate::error::Result;

/// Source map style used outside production.
pub const DEV_SOURCE_MAP: &str = "cheap-module-source-map";

/// Prefix of the production archive name.
pub const ARCHIVE_PREFIX: &str = "moco-bx";

/// Files matching this are left out of the archive.
pub const SOURCE_MAP_PATTERN: &str = r"\.map$";

/// Third-party dependencies are never transformed.
pub const DEPENDENCY_PATTERN: &str = "node_modules";

/// Files the clean step keeps in the output directory.
pub const KEEP_PATTERNS: [&str; 2] = ["!manifest.json", "!*.html"];

/// Constant exposing the node environment to bundled code.
pub const NODE_ENV_CONSTANT: &str = "process.env.NODE_ENV";

/// Constant exposing the local mock service flag to bundled code.
pub const MOCK_SERVICE_CONSTANT: &str = "process.env.USE_LOCAL_MOCO";

/// Resolve the build plan for one environment.
///
/// Missing browser target or package version are not rejected: they
/// render as `undefined` in paths and filenames. Use [`resolve_strict`] to
/// fail fast instead.
///
/// # Example
///
/// ```
/// use bxplan::config::ProjectLayout;
/// use bxplan::environment::{EnvironmentDescriptor, NodeEnvironment};
/// use bxplan::plan::resolve;
///
/// let env = EnvironmentDescriptor::new("chrome", "1.2.0")
///     .with_node_environment(NodeEnvironment::Production);
/// let plan = resolve(&env, &ProjectLayout::new("/ext"));
///
/// assert_eq!(plan.output.filename_for("background"), "background.1.2.0.js");
/// assert_eq!(plan.devtool, None);
/// assert_eq!(plan.archive().unwrap().filename, "moco-bx-chrome-v1.2.0.zip");
/// ```
pub fn resolve(env: &EnvironmentDescriptor, layout: &ProjectLayout) -> BuildPlan {
    let production = env.is_production();
    let output = output_descriptor(env, layout);

    let plugins = PluginListBuilder::new()
        .extend(base_plugins(env, layout, &output.path))
        .push_if(production, || PluginStep::Archive(archive_step(env)))
        .build();

    tracing::debug!(
        browser = browser_or_undefined(env),
        mode = %env.node_environment,
        plugins = plugins.len(),
        archive = production,
        "Resolved build plan"
    );

    BuildPlan {
        entry: EntryMap::standard(),
        output,
        module: ModuleOptions {
            rules: transform_rules(layout),
        },
        plugins,
        resolve: resolve_options(layout),
        mode: env.node_environment.as_str().to_string(),
        devtool: (!production).then(|| DEV_SOURCE_MAP.to_string()),
    }
}

/// Validate the descriptor, then resolve.
pub fn resolve_strict(env: &EnvironmentDescriptor, layout: &ProjectLayout) -> Result<BuildPlan> {
    validate(env)?;
    let plan = resolve(env, layout);
    check_invariants(&plan, env)?;
    Ok(plan)
}

/// Resolve one plan per descriptor, in input order.
///
/// Each descriptor is resolved independently; the layout is shared
/// read-only.
pub fn resolve_all(envs: &[EnvironmentDescriptor], layout: &ProjectLayout) -> Vec<BuildPlan> {
    envs.iter().map(|env| resolve(env, layout)).collect()
}

/// Output directory and bundle naming.
pub fn output_descriptor(env: &EnvironmentDescriptor, layout: &ProjectLayout) -> OutputDescriptor {
    OutputDescriptor {
        path: layout.build_dir(env.browser_target.as_deref()),
        public_path: String::new(),
        filename: format!("{}.{}.js", NAME_PLACEHOLDER, version_or_undefined(env)),
    }
}

/// The four transform rules, in order: stylesheets, scripts, raster
/// images, vector images. Vector images from dependencies are inlined too.
pub fn transform_rules(layout: &ProjectLayout) -> Vec<TransformRule> {
    vec![
        TransformRule {
            test: r"\.scss$".to_string(),
            loaders: vec![
                LoaderSpec::new("mini-css-extract-loader"),
                LoaderSpec::new("css-loader"),
                LoaderSpec::with_options(
                    "sass-loader",
                    json!({
                        "sassOptions": {
                            "includePaths": [layout.styles_dir()]
                        }
                    }),
                ),
            ],
            exclude: vec![DEPENDENCY_PATTERN.to_string()],
        },
        TransformRule {
            test: r"\.js$".to_string(),
            loaders: vec![LoaderSpec::new("babel-loader")],
            exclude: vec![DEPENDENCY_PATTERN.to_string()],
        },
        TransformRule {
            test: r"\.(jpg|png)$".to_string(),
            loaders: vec![LoaderSpec::with_options(
                "file-loader",
                json!({ "name": "[path][name].[ext]" }),
            )],
            exclude: vec![DEPENDENCY_PATTERN.to_string()],
        },
        TransformRule {
            test: r"\.svg$".to_string(),
            loaders: vec![LoaderSpec::new("svg-inline-loader")],
            exclude: vec![],
        },
    ]
}

/// Steps present in every plan: clean, define constants, extract styles,
/// then one HTML page per entry that has one.
pub fn base_plugins(
    env: &EnvironmentDescriptor,
    layout: &ProjectLayout,
    output_dir: &Path,
) -> Vec<PluginStep> {
    PluginListBuilder::new()
        .push(PluginStep::CleanOutput {
            keep_patterns: KEEP_PATTERNS.iter().map(|p| p.to_string()).collect(),
        })
        .push(PluginStep::Define {
            definitions: define_constants(env),
        })
        .push(PluginStep::ExtractCss {
            filename: format!("{}.css", NAME_PLACEHOLDER),
            chunk_filename: "[id].css".to_string(),
        })
        .extend(Entry::pages().map(|entry| {
            PluginStep::HtmlTemplate(html_template(entry, layout, output_dir))
        }))
        .build()
}

/// Build-time constants injected into bundled code.
pub fn define_constants(env: &EnvironmentDescriptor) -> BTreeMap<String, serde_json::Value> {
    BTreeMap::from([
        (
            NODE_ENV_CONSTANT.to_string(),
            json!(env.node_environment.as_str()),
        ),
        (
            MOCK_SERVICE_CONSTANT.to_string(),
            json!(env.use_local_mock_service),
        ),
    ])
}

/// Page instantiation for one entry.
pub fn html_template(entry: Entry, layout: &ProjectLayout, output_dir: &Path) -> HtmlTemplateStep {
    HtmlTemplateStep {
        entry: entry.name().to_string(),
        template: layout.page_template(entry.name()),
        filename: output_dir.join(format!("{}.html", entry.name())),
        chunks: vec![entry.name().to_string()],
    }
}

/// Production archive of the output directory.
pub fn archive_step(env: &EnvironmentDescriptor) -> ArchiveStep {
    ArchiveStep {
        filename: format!(
            "{}-{}-v{}.zip",
            ARCHIVE_PREFIX,
            browser_or_undefined(env),
            version_or_undefined(env)
        ),
        exclude: vec![SOURCE_MAP_PATTERN.to_string()],
    }
}

/// Module search paths and aliases.
pub fn resolve_options(layout: &ProjectLayout) -> ResolveOptions {
    ResolveOptions {
        modules: vec![layout.scripts_dir(), DEPENDENCY_PATTERN.into()],
        alias: BTreeMap::from([("images".to_string(), layout.images_dir())]),
    }
}

fn browser_or_undefined(env: &EnvironmentDescriptor) -> &str {
    env.browser_target.as_deref().unwrap_or(UNDEFINED)
}

fn version_or_undefined(env: &EnvironmentDescriptor) -> &str {
    env.package_version.as_deref().unwrap_or(UNDEFINED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::NodeEnvironment;
    use std::path::PathBuf;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("/ext")
    }

    fn dev(browser: &str) -> EnvironmentDescriptor {
        EnvironmentDescriptor::new(browser, "1.2.0")
    }

    fn prod(browser: &str) -> EnvironmentDescriptor {
        dev(browser).with_node_environment(NodeEnvironment::Production)
    }

    #[test]
    fn output_path_and_filename_embed_inputs() {
        let plan = resolve(&dev("firefox"), &layout());
        assert_eq!(plan.output.path, PathBuf::from("/ext/build/firefox"));
        assert_eq!(plan.output.filename, "[name].1.2.0.js");
        assert_eq!(plan.output.public_path, "");
    }

    #[test]
    fn every_bundle_filename_contains_version() {
        let plan = resolve(&dev("chrome"), &layout());
        let names = plan.bundle_filenames();
        assert_eq!(names.len(), 4);
        assert!(names.iter().all(|n| n.contains("1.2.0")));
        assert!(names.contains(&"content.1.2.0.js".to_string()));
    }

    #[test]
    fn development_keeps_source_maps_and_skips_archive() {
        let plan = resolve(&dev("chrome"), &layout());
        assert_eq!(plan.devtool.as_deref(), Some(DEV_SOURCE_MAP));
        assert!(plan.archive().is_none());
        assert_eq!(plan.mode, "development");
    }

    #[test]
    fn production_drops_source_maps_and_archives_last() {
        let development = resolve(&dev("chrome"), &layout());
        let production = resolve(&prod("chrome"), &layout());

        assert_eq!(production.devtool, None);
        assert_eq!(production.plugins.len(), development.plugins.len() + 1);
        assert_eq!(production.plugins.last().map(PluginStep::name), Some("archive"));
        assert_eq!(
            production.plugins[..development.plugins.len()],
            development.plugins[..]
        );
    }

    #[test]
    fn unknown_mode_is_not_production() {
        let env = dev("chrome").with_node_environment(NodeEnvironment::Other("staging".into()));
        let plan = resolve(&env, &layout());
        assert_eq!(plan.mode, "staging");
        assert!(plan.devtool.is_some());
        assert!(plan.archive().is_none());
    }

    #[test]
    fn plugin_order_is_fixed() {
        let plan = resolve(&dev("chrome"), &layout());
        let names: Vec<_> = plan.plugins.iter().map(PluginStep::name).collect();
        assert_eq!(
            names,
            [
                "clean-output",
                "define",
                "extract-css",
                "html-template",
                "html-template",
                "html-template"
            ]
        );
        let pages: Vec<_> = plan.html_templates().map(|t| t.entry.as_str()).collect();
        assert_eq!(pages, ["background", "popup", "options"]);
    }

    #[test]
    fn html_templates_write_into_output_dir() {
        let plan = resolve(&dev("edge"), &layout());
        let popup = plan.html_templates().find(|t| t.entry == "popup").unwrap();
        assert_eq!(popup.template, PathBuf::from("/ext/src/popup.html"));
        assert_eq!(popup.filename, PathBuf::from("/ext/build/edge/popup.html"));
        assert_eq!(popup.chunks, ["popup"]);
    }

    #[test]
    fn define_constants_follow_descriptor() {
        let on = resolve(&dev("chrome").with_local_mock_service(true), &layout());
        let off = resolve(&dev("chrome"), &layout());

        assert_eq!(on.definition(MOCK_SERVICE_CONSTANT), Some(&json!(true)));
        assert_eq!(off.definition(MOCK_SERVICE_CONSTANT), Some(&json!(false)));
        assert_eq!(on.definition(NODE_ENV_CONSTANT), Some(&json!("development")));
    }

    #[test]
    fn rules_cover_assets_and_inline_dependency_svgs() {
        let rules = transform_rules(&layout());
        assert_eq!(rules.len(), 4);

        let matching = |path: &str| -> Vec<usize> {
            rules
                .iter()
                .enumerate()
                .filter(|(_, r)| r.applies_to(path).unwrap())
                .map(|(i, _)| i)
                .collect()
        };

        assert_eq!(matching("src/css/popup.scss"), [0]);
        assert_eq!(matching("src/js/popup.js"), [1]);
        assert_eq!(matching("src/images/logo.png"), [2]);
        assert_eq!(matching("src/images/photo.jpg"), [2]);
        assert_eq!(matching("src/images/icon.svg"), [3]);
        assert!(matching("node_modules/x/index.js").is_empty());
        assert!(matching("node_modules/x/logo.png").is_empty());
        assert_eq!(matching("node_modules/x/icon.svg"), [3]);
        assert!(matching("src/images/logo.gif").is_empty());
    }

    #[test]
    fn stylesheet_chain_order() {
        let rules = transform_rules(&layout());
        assert_eq!(
            rules[0].loader_names(),
            ["mini-css-extract-loader", "css-loader", "sass-loader"]
        );
        let sass = rules[0].loaders[2].options.as_ref().unwrap();
        assert_eq!(
            sass["sassOptions"]["includePaths"][0],
            json!("/ext/src/css")
        );
    }

    #[test]
    fn resolve_options_search_scripts_then_dependencies() {
        let options = resolve_options(&layout());
        assert_eq!(
            options.modules,
            [PathBuf::from("/ext/src/js"), PathBuf::from("node_modules")]
        );
        assert_eq!(
            options.alias.get("images"),
            Some(&PathBuf::from("/ext/src/images"))
        );
    }

    #[test]
    fn missing_inputs_render_undefined() {
        let env = EnvironmentDescriptor::default()
            .with_node_environment(NodeEnvironment::Production);
        let plan = resolve(&env, &layout());
        assert_eq!(plan.output.path, PathBuf::from("/ext/build/undefined"));
        assert_eq!(plan.output.filename, "[name].undefined.js");
        assert_eq!(
            plan.archive().unwrap().filename,
            "moco-bx-undefined-vundefined.zip"
        );
    }

    #[test]
    fn resolve_strict_rejects_missing_browser() {
        let env = EnvironmentDescriptor {
            package_version: Some("1.0.0".into()),
            ..Default::default()
        };
        assert!(resolve_strict(&env, &layout()).is_err());
    }

    #[test]
    fn resolve_strict_accepts_complete_descriptor() {
        let plan = resolve_strict(&prod("chrome"), &layout()).unwrap();
        assert_eq!(plan, resolve(&prod("chrome"), &layout()));
    }

    #[test]
    fn resolve_is_idempotent() {
        let env = prod("firefox").with_local_mock_service(true);
        assert_eq!(resolve(&env, &layout()), resolve(&env, &layout()));
    }

    #[test]
    fn resolve_all_keeps_order_and_independence() {
        let envs = [prod("chrome"), dev("firefox")];
        let plans = resolve_all(&envs, &layout());
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].output.path, PathBuf::from("/ext/build/chrome"));
        assert!(plans[0].archive().is_some());
        assert_eq!(plans[1].output.path, PathBuf::from("/ext/build/firefox"));
        assert!(plans[1].archive().is_none());
    }

    #[test]
    fn define_constants_are_json_literals() {
        let env = dev("chrome").with_local_mock_service(true);
        insta::assert_json_snapshot!(define_constants(&env), @r#"
        {
          "process.env.NODE_ENV": "development",
          "process.env.USE_LOCAL_MOCO": true
        }
        "#);
    }
}
