// src/preflight.rs

//! Preflight runner: validate each task's resources and report the result.
//!
//! This is the thin task-runner shell around the two core pieces:
//! [`ResourceValidator`] runs first, then [`ResultReporter`] logs the outcome.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::{Manifest, TaskCheck};
use crate::errors::{Result, TaskguardError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::report::{ResultReporter, SpinnerIndicator};
use crate::resources::ResourceValidator;
use crate::task::{SelfReportingTask, Task, TaskResult};

/// A manifest task as seen by the reporter.
///
/// Validation errors are logged while the check runs, so a failed preflight
/// task counts as having printed its own output.
#[derive(Debug, Clone)]
pub struct PreflightTask {
    name: String,
    printed: bool,
}

impl Task for PreflightTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_self_reporting(&self) -> Option<&dyn SelfReportingTask> {
        Some(self)
    }
}

impl SelfReportingTask for PreflightTask {
    fn was_output_printed(&self) -> bool {
        self.printed
    }
}

/// Summary of a preflight run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreflightOutcome {
    pub checked: Vec<String>,
    pub failed: Vec<String>,
    pub stopped_early: bool,
}

impl PreflightOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.failed.is_empty() { 0 } else { 1 }
    }
}

pub struct Preflight<'a> {
    fs: Arc<dyn FileSystem>,
    reporter: &'a ResultReporter,
    spinner: Option<Arc<SpinnerIndicator>>,
    stop_on_fail: bool,
}

impl<'a> Preflight<'a> {
    pub fn new(reporter: &'a ResultReporter) -> Self {
        Self::with_fs(Arc::new(RealFileSystem), reporter)
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>, reporter: &'a ResultReporter) -> Self {
        Self {
            fs,
            reporter,
            spinner: None,
            stop_on_fail: false,
        }
    }

    /// Spinner shown while a task is being checked.
    ///
    /// The same spinner should be registered on the reporter so log lines
    /// hide it.
    pub fn with_spinner(mut self, spinner: Arc<SpinnerIndicator>) -> Self {
        self.spinner = Some(spinner);
        self
    }

    pub fn stop_on_fail(mut self, stop: bool) -> Self {
        self.stop_on_fail = stop;
        self
    }

    /// Validate one task and build its result. Does not report the result.
    pub fn check_task(&self, name: &str, check: &TaskCheck) -> TaskResult {
        let started = Instant::now();
        if let Some(spinner) = &self.spinner {
            spinner.show(format!("checking {name}"));
        }

        let validator = ResourceValidator::with_fs(Arc::clone(&self.fs), self.reporter, name);

        let inputs_ok = check.inputs.is_empty() || validator.validate(check.inputs.clone(), check.kind);
        let pairs_ok = check.copy.is_empty()
            || validator
                .validate_source_and_target_pairs(check.copy.iter().map(|(s, t)| (s.as_str(), t.as_str())))
                .is_valid();

        let elapsed = started.elapsed();
        if let Some(spinner) = &self.spinner {
            spinner.clear();
        }

        let ok = inputs_ok && pairs_ok;
        debug!(task = %name, inputs_ok, pairs_ok, ?elapsed, "task preflight finished");

        let task: Arc<dyn Task> = Arc::new(PreflightTask {
            name: name.to_string(),
            printed: !ok,
        });

        let result = if ok {
            TaskResult::success(Some(task))
        } else {
            TaskResult::error(Some(task), format!("Preflight failed for task '{name}'"))
        };

        result
            .with_execution_time(elapsed)
            .with_context("task", name)
            .with_context("patterns", check.all_patterns().len())
    }

    /// Check every task in the manifest (or only `only`), reporting as it
    /// goes.
    pub fn run(&self, manifest: &Manifest, only: Option<&str>) -> Result<PreflightOutcome> {
        let selected: Vec<(&String, &TaskCheck)> = match only {
            Some(name) => {
                let entry = manifest
                    .tasks()
                    .get_key_value(name)
                    .ok_or_else(|| TaskguardError::TaskNotFound(name.to_string()))?;
                vec![entry]
            }
            None => manifest.tasks().iter().collect(),
        };

        info!(tasks = selected.len(), stop_on_fail = self.stop_on_fail, "starting preflight");

        let mut outcome = PreflightOutcome::default();
        for (name, check) in selected {
            let result = self.check_task(name, check);
            self.reporter.report(&result);
            outcome.checked.push(name.clone());

            if !result.was_successful() {
                outcome.failed.push(name.clone());
                if self.stop_on_fail {
                    self.reporter.report_stop_on_fail(&result);
                    outcome.stopped_early = true;
                    break;
                }
            }
        }

        info!(
            checked = outcome.checked.len(),
            failed = outcome.failed.len(),
            "preflight finished"
        );
        Ok(outcome)
    }
}
