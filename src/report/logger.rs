// src/report/logger.rs

//! Leveled, template-based logging used by the reporter.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::report::context::{interpolate, LogContext};

/// Levels the reporter can emit at.
///
/// `Notice` and `Success` have no direct `tracing` counterpart; see
/// [`TracingLogger`] for how they are mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Error,
    Warning,
    Notice,
    Success,
    Info,
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Notice => "notice",
            LogLevel::Success => "success",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

/// Structured logger capability.
///
/// `message` is a template; `{key}` placeholders are resolved from `context`
/// by the implementation.
pub trait StructuredLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext);

    fn error(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Error, message, context);
    }

    fn warning(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Warning, message, context);
    }

    fn notice(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Notice, message, context);
    }

    fn success(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Success, message, context);
    }

    fn info(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Info, message, context);
    }

    fn debug(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Debug, message, context);
    }
}

/// Render a template into the final line.
///
/// When the context carries `time`, it is appended after `timer-label`
/// (e.g. `"Done in 1.250s"`).
pub fn render(message: &str, context: &LogContext) -> String {
    let mut line = interpolate(message, context);
    if let Some(time) = context.get("time") {
        match context.get("timer-label") {
            Some(label) => line.push_str(&format!(" {label} {time}")),
            None => line.push_str(&format!(" {time}")),
        }
    }
    line
}

/// [`StructuredLogger`] on top of `tracing`.
///
/// - `Error` → `error!`, `Warning` → `warn!`
/// - `Notice` → `warn!` with `status = "notice"`
/// - `Success` → `info!` with `status = "success"`, `Info` → `info!`
/// - `Debug` → `debug!`
///
/// A `task` entry in the context is attached as a structured field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl StructuredLogger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        let line = render(message, context);
        let task = context.get("task").map(|v| v.to_string());
        let task = task.as_deref();

        match level {
            LogLevel::Error => error!(task, "{line}"),
            LogLevel::Warning => warn!(task, "{line}"),
            LogLevel::Notice => warn!(task, status = "notice", "{line}"),
            LogLevel::Success => info!(task, status = "success", "{line}"),
            LogLevel::Info => info!(task, "{line}"),
            LogLevel::Debug => debug!(task, "{line}"),
        }
    }
}
