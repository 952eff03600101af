#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use taskguard::report::logger::render;
use taskguard::report::{LogContext, LogLevel, ProgressIndicator, StructuredLogger, Visibility};
use taskguard::resources::TaskErrorReporter;
use taskguard::task::{SelfReportingTask, Task};

/// One line captured by [`RecordingLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedLine {
    pub level: LogLevel,
    pub template: String,
    pub rendered: String,
    pub context: LogContext,
    /// Indicator visibility observed while the line was being written.
    pub indicator_visible: Option<bool>,
}

/// A logger that records everything it is asked to log.
///
/// Optionally watches an indicator so tests can assert it was hidden at the
/// moment of writing.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<LoggedLine>>,
    watched: Mutex<Option<std::sync::Arc<dyn ProgressIndicator>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&self, indicator: std::sync::Arc<dyn ProgressIndicator>) {
        *self.watched.lock().unwrap() = Some(indicator);
    }

    pub fn lines(&self) -> Vec<LoggedLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn rendered(&self) -> Vec<(LogLevel, String)> {
        self.lines()
            .into_iter()
            .map(|l| (l.level, l.rendered))
            .collect()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.lines().iter().filter(|l| l.level == level).count()
    }
}

impl StructuredLogger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        let indicator_visible = self
            .watched
            .lock()
            .unwrap()
            .as_ref()
            .map(|i| i.visibility() == Visibility::Visible);

        self.lines.lock().unwrap().push(LoggedLine {
            level,
            template: message.to_string(),
            rendered: render(message, context),
            context: context.clone(),
            indicator_visible,
        });
    }
}

/// A logger whose every call panics.
#[derive(Default)]
pub struct PanickingLogger;

impl StructuredLogger for PanickingLogger {
    fn log(&self, _level: LogLevel, message: &str, _context: &LogContext) {
        panic!("logger exploded while writing {message:?}");
    }
}

/// Collects validator errors as `(message, source)` pairs.
#[derive(Default)]
pub struct RecordingErrorReporter {
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn sources(&self) -> Vec<String> {
        self.errors.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskErrorReporter for RecordingErrorReporter {
    fn report_task_error(&self, message: &str, source: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((message.to_string(), source.to_string()));
    }
}

/// In-memory indicator that counts hide/restore calls.
#[derive(Default)]
pub struct FlagIndicator {
    visible: AtomicBool,
    hides: AtomicUsize,
    restores: AtomicUsize,
}

impl FlagIndicator {
    pub fn visible() -> Self {
        Self {
            visible: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn hides(&self) -> usize {
        self.hides.load(Ordering::SeqCst)
    }

    pub fn restores(&self) -> usize {
        self.restores.load(Ordering::SeqCst)
    }
}

impl ProgressIndicator for FlagIndicator {
    fn hide(&self) -> Visibility {
        self.hides.fetch_add(1, Ordering::SeqCst);
        if self.visible.swap(false, Ordering::SeqCst) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    fn restore(&self, previous: Visibility) {
        self.restores.fetch_add(1, Ordering::SeqCst);
        self.visible
            .store(previous == Visibility::Visible, Ordering::SeqCst);
    }

    fn visibility(&self) -> Visibility {
        if self.visible.load(Ordering::SeqCst) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

/// A task without the self-reporting capability.
pub struct PlainTask(pub &'static str);

impl Task for PlainTask {
    fn name(&self) -> &str {
        self.0
    }
}

/// A task that may have printed its own output.
pub struct PrintingTask {
    pub name: &'static str,
    pub printed: bool,
}

impl Task for PrintingTask {
    fn name(&self) -> &str {
        self.name
    }

    fn as_self_reporting(&self) -> Option<&dyn SelfReportingTask> {
        Some(self)
    }
}

impl SelfReportingTask for PrintingTask {
    fn was_output_printed(&self) -> bool {
        self.printed
    }
}
