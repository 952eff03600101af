// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::model::{Manifest, RawManifest, RawTaskCheck, TaskCheck};
use crate::errors::{Result, TaskguardError};
use crate::resources::ResourceKind;

impl TryFrom<RawManifest> for Manifest {
    type Error = TaskguardError;

    fn try_from(raw: RawManifest) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;

        let mut tasks = BTreeMap::new();
        for (name, task) in raw.task {
            let check = validate_task(&name, task)?;
            tasks.insert(name, check);
        }

        Ok(Manifest::new_unchecked(raw.config, tasks))
    }
}

fn ensure_has_tasks(raw: &RawManifest) -> Result<()> {
    if raw.task.is_empty() {
        return Err(TaskguardError::ConfigError(
            "manifest must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_task(name: &str, raw: RawTaskCheck) -> Result<TaskCheck> {
    // Parsed first: an unknown kind is an argument error regardless of
    // what else is wrong with the task.
    let kind: ResourceKind = match raw.kind.as_deref() {
        Some(kind) => kind.parse()?,
        None => ResourceKind::default(),
    };

    let inputs = raw.inputs.map(|spec| spec.into_patterns()).unwrap_or_default();

    if inputs.is_empty() && raw.copy.is_empty() {
        return Err(TaskguardError::ConfigError(format!(
            "task '{name}' must declare `inputs` or `copy`"
        )));
    }

    let blank_input = inputs.iter().any(|p| p.trim().is_empty());
    let blank_pair = raw
        .copy
        .iter()
        .any(|(source, target)| source.trim().is_empty() || target.trim().is_empty());
    if blank_input || blank_pair {
        return Err(TaskguardError::ConfigError(format!(
            "task '{name}' has an empty path pattern"
        )));
    }

    Ok(TaskCheck {
        inputs,
        kind,
        copy: raw.copy,
    })
}
