// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::resources::{ResourceKind, ResourceSpec};

/// Manifest as read from TOML, before validation.
///
/// ```toml
/// [config]
/// stop_on_fail = true
///
/// [task.build]
/// inputs = ["src/**/*.rs", "Cargo.toml"]
/// kind = "file"
///
/// [task.publish]
/// copy = { "dist/app" = "/srv/app" }
/// ```
///
/// All sections are optional at the serde level; [`Manifest::try_from`]
/// enforces the semantic rules.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawManifest {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, RawTaskCheck>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// Abort the remaining checks after the first failing task.
    #[serde(default)]
    pub stop_on_fail: bool,
}

/// `[task.<name>]` section as written.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTaskCheck {
    /// Input patterns: one string or a list.
    #[serde(default)]
    pub inputs: Option<ResourceSpec>,

    /// `"file"`, `"dir"` or `"fileAndDir"`. Kept as a string here so an
    /// unknown value surfaces as `InvalidArgument`, not a TOML error.
    #[serde(default)]
    pub kind: Option<String>,

    /// `source = target` pairs; both sides must exist.
    #[serde(default)]
    pub copy: BTreeMap<String, String>,
}

/// A validated task check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCheck {
    pub inputs: Vec<String>,
    pub kind: ResourceKind,
    pub copy: BTreeMap<String, String>,
}

impl TaskCheck {
    /// Every pattern this task touches, inputs first, then copy sources and
    /// targets.
    pub fn all_patterns(&self) -> Vec<String> {
        let mut patterns = self.inputs.clone();
        patterns.extend(self.copy.keys().cloned());
        patterns.extend(self.copy.values().cloned());
        patterns
    }
}

/// Validated manifest.
///
/// Only produced through `TryFrom<RawManifest>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct Manifest {
    config: ConfigSection,
    task: BTreeMap<String, TaskCheck>,
}

impl Manifest {
    pub(crate) fn new_unchecked(config: ConfigSection, task: BTreeMap<String, TaskCheck>) -> Self {
        Self { config, task }
    }

    pub fn config_section(&self) -> &ConfigSection {
        &self.config
    }

    pub fn tasks(&self) -> &BTreeMap<String, TaskCheck> {
        &self.task
    }

    pub fn task(&self, name: &str) -> Option<&TaskCheck> {
        self.task.get(name)
    }
}
