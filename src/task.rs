// src/task.rs

//! The task-facing types the reporter reads: task identity, the optional
//! "already printed" capability, and the outcome of a run.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::report::context::{ContextValue, LogContext};

/// A unit of work as seen by the reporter.
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    /// Capability query for [`SelfReportingTask`].
    ///
    /// Tasks that print their own output override this to return
    /// `Some(self)`; everything else keeps the default.
    fn as_self_reporting(&self) -> Option<&dyn SelfReportingTask> {
        None
    }
}

/// Optional capability: a task that may already have printed its own output.
pub trait SelfReportingTask: Task {
    fn was_output_printed(&self) -> bool;
}

/// Outcome of a task run. Owned by the task runner; the reporter only reads it.
#[derive(Clone)]
pub struct TaskResult {
    task: Option<Arc<dyn Task>>,
    exit_code: i32,
    message: String,
    context: LogContext,
    execution_time: Option<Duration>,
}

impl TaskResult {
    pub fn new(task: Option<Arc<dyn Task>>, exit_code: i32, message: impl Into<String>) -> Self {
        Self {
            task,
            exit_code,
            message: message.into(),
            context: LogContext::new(),
            execution_time: None,
        }
    }

    pub fn success(task: Option<Arc<dyn Task>>) -> Self {
        Self::new(task, 0, "")
    }

    pub fn error(task: Option<Arc<dyn Task>>, message: impl Into<String>) -> Self {
        Self::new(task, 1, message)
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn with_execution_time(mut self, elapsed: Duration) -> Self {
        self.execution_time = Some(elapsed);
        self
    }

    pub fn was_successful(&self) -> bool {
        self.exit_code == 0
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn task(&self) -> Option<&Arc<dyn Task>> {
        self.task.as_ref()
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn execution_time(&self) -> Option<Duration> {
        self.execution_time
    }

    /// Context used to render log lines for this result.
    ///
    /// Starts from `message`, `code` and (if known) `time`, then layers the
    /// caller-supplied context on top; caller keys win.
    pub fn log_context(&self) -> LogContext {
        let mut ctx = LogContext::new();
        ctx.insert("message", self.message.as_str());
        ctx.insert("code", self.exit_code);
        if let Some(elapsed) = self.execution_time {
            ctx.insert("time", elapsed);
        }
        ctx.extend(self.context.clone());
        ctx
    }
}

impl fmt::Debug for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskResult")
            .field("task", &self.task.as_ref().map(|t| t.name().to_string()))
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .field("execution_time", &self.execution_time)
            .finish_non_exhaustive()
    }
}
