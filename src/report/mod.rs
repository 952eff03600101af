// src/report/mod.rs

//! Reporting task outcomes.
//!
//! - [`context`]: named values for `{placeholder}` templates.
//! - [`logger`]: the leveled [`StructuredLogger`] seam and its `tracing`
//!   implementation.
//! - [`indicator`]: progress indicator plus the RAII hide/restore guard.
//! - [`reporter`]: [`ResultReporter`], which decides what to log for a
//!   [`TaskResult`](crate::task::TaskResult).

pub mod context;
pub mod indicator;
pub mod logger;
pub mod reporter;

pub use context::{ContextValue, LogContext};
pub use indicator::{IndicatorGuard, NoIndicator, ProgressIndicator, SpinnerIndicator, Visibility};
pub use logger::{LogLevel, StructuredLogger, TracingLogger};
pub use reporter::ResultReporter;
