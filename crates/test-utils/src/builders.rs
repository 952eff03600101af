#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use taskguard::config::{Manifest, RawManifest, RawTaskCheck};
use taskguard::report::ContextValue;
use taskguard::resources::ResourceSpec;
use taskguard::task::{Task, TaskResult};

/// Builder for `Manifest` to simplify test setup.
pub struct ManifestBuilder {
    manifest: RawManifest,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: RawManifest::default(),
        }
    }

    pub fn with_task(mut self, name: &str, task: RawTaskCheck) -> Self {
        self.manifest.task.insert(name.to_string(), task);
        self
    }

    pub fn stop_on_fail(mut self, val: bool) -> Self {
        self.manifest.config.stop_on_fail = val;
        self
    }

    pub fn build(self) -> Manifest {
        Manifest::try_from(self.manifest).expect("Failed to build valid manifest from builder")
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawTaskCheck`.
#[derive(Default)]
pub struct TaskCheckBuilder {
    task: RawTaskCheck,
}

impl TaskCheckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, pattern: &str) -> Self {
        let mut patterns = self
            .task
            .inputs
            .take()
            .map(ResourceSpec::into_patterns)
            .unwrap_or_default();
        patterns.push(pattern.to_string());
        self.task.inputs = Some(ResourceSpec::Many(patterns));
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.task.kind = Some(kind.to_string());
        self
    }

    pub fn copy(mut self, source: &str, target: &str) -> Self {
        self.task.copy.insert(source.to_string(), target.to_string());
        self
    }

    pub fn build(self) -> RawTaskCheck {
        self.task
    }
}

/// Builder for `TaskResult`.
pub struct TaskResultBuilder {
    task: Option<Arc<dyn Task>>,
    exit_code: i32,
    message: String,
    elapsed: Option<Duration>,
    context: Vec<(String, ContextValue)>,
}

impl TaskResultBuilder {
    pub fn success() -> Self {
        Self {
            task: None,
            exit_code: 0,
            message: String::new(),
            elapsed: None,
            context: Vec::new(),
        }
    }

    pub fn failure(exit_code: i32, message: &str) -> Self {
        Self {
            exit_code,
            message: message.to_string(),
            ..Self::success()
        }
    }

    pub fn task(mut self, task: impl Task + 'static) -> Self {
        self.task = Some(Arc::new(task));
        self
    }

    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    pub fn context(mut self, key: &str, value: impl Into<ContextValue>) -> Self {
        self.context.push((key.to_string(), value.into()));
        self
    }

    pub fn build(self) -> TaskResult {
        let mut result = TaskResult::new(self.task, self.exit_code, self.message);
        if let Some(elapsed) = self.elapsed {
            result = result.with_execution_time(elapsed);
        }
        for (key, value) in self.context {
            result = result.with_context(key, value);
        }
        result
    }
}
