//! Ordered plugin-list construction.
//!
//! Plugin order is part of the contract. Rather than pushing into a shared
//! list, resolution describes the list as a sequence of steps, some of them
//! conditional, and builds it once.

use super::types::PluginStep;

/// Builds an ordered list of plugin steps.
///
/// # Example
///
/// ```
/// use bxplan::plan::{ArchiveStep, PluginListBuilder, PluginStep};
///
/// let production = false;
/// let plugins = PluginListBuilder::new()
///     .push(PluginStep::CleanOutput { keep_patterns: vec![] })
///     .push_if(production, || {
///         PluginStep::Archive(ArchiveStep { filename: "out.zip".into(), exclude: vec![] })
///     })
///     .build();
///
/// assert_eq!(plugins.len(), 1);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct PluginListBuilder {
    steps: Vec<PluginStep>,
}

impl PluginListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step unconditionally.
    pub fn push(mut self, step: PluginStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append every step from an iterator, preserving its order.
    pub fn extend(mut self, steps: impl IntoIterator<Item = PluginStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Append a step only when `condition` holds. The step is not
    /// constructed otherwise.
    pub fn push_if(mut self, condition: bool, step: impl FnOnce() -> PluginStep) -> Self {
        if condition {
            self.steps.push(step());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn build(self) -> Vec<PluginStep> {
        self.steps
    }
}
