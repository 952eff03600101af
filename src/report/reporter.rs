// src/report/reporter.rs

//! Turns task results into log lines.

use std::sync::Arc;

use tracing::trace;

use crate::report::context::LogContext;
use crate::report::indicator::{IndicatorGuard, NoIndicator, ProgressIndicator};
use crate::report::logger::{LogLevel, StructuredLogger, TracingLogger};
use crate::resources::TaskErrorReporter;
use crate::task::TaskResult;

/// Logs the outcome of tasks.
///
/// Every line goes through [`ResultReporter::emit`], which keeps the
/// progress indicator off the terminal while the line is written.
#[derive(Clone)]
pub struct ResultReporter {
    logger: Arc<dyn StructuredLogger>,
    indicator: Arc<dyn ProgressIndicator>,
}

impl ResultReporter {
    pub fn new(logger: Arc<dyn StructuredLogger>) -> Self {
        Self {
            logger,
            indicator: Arc::new(NoIndicator),
        }
    }

    pub fn with_progress_indicator(mut self, indicator: Arc<dyn ProgressIndicator>) -> Self {
        self.indicator = indicator;
        self
    }

    /// Log the result of a task.
    ///
    /// Returns `true` if a line was emitted.
    pub fn report(&self, result: &TaskResult) -> bool {
        if result.was_successful() {
            self.report_success(result)
        } else {
            self.report_error(result)
        }
    }

    /// Log that the run is being aborted because a task failed in
    /// stop-on-fail mode.
    pub fn report_stop_on_fail(&self, result: &TaskResult) {
        self.emit(LogLevel::Notice, "Stopping on fail. Exiting....", &LogContext::new());

        let mut context = LogContext::new();
        context.insert("code", result.exit_code());
        self.emit(LogLevel::Error, "Exit Code: {code}", &context);
    }

    fn report_error(&self, result: &TaskResult) -> bool {
        let mut context = result.log_context();
        context.insert_default("timer-label", "Time");
        if let Some(style) = context.map_mut("_style") {
            style.insert_default("message", "");
        }

        let already_printed = result
            .task()
            .and_then(|task| task.as_self_reporting())
            .is_some_and(|task| task.was_output_printed());

        if !already_printed {
            self.emit(LogLevel::Error, "{message}", &context);
        }
        self.emit(LogLevel::Error, "Exit code {code}", &context);
        true
    }

    fn report_success(&self, result: &TaskResult) -> bool {
        let mut context = result.log_context();
        context.insert_default("timer-label", "in");

        match result.execution_time() {
            Some(elapsed) if !elapsed.is_zero() => {
                self.emit(LogLevel::Success, "Done", &context);
                true
            }
            _ => false,
        }
    }

    /// Single choke point for every line: hide the indicator, log, restore.
    fn emit(&self, level: LogLevel, message: &str, context: &LogContext) {
        let guard = IndicatorGuard::hide(self.indicator.as_ref());
        trace!(%level, previous = ?guard.previous(), "emitting report line");
        self.logger.log(level, message, context);
        drop(guard);
    }
}

impl Default for ResultReporter {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl TaskErrorReporter for ResultReporter {
    fn report_task_error(&self, message: &str, source: &str) {
        let mut context = LogContext::new();
        context.insert("task", source);
        self.emit(LogLevel::Error, message, &context);
    }
}
