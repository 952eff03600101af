// src/report/indicator.rs

//! Terminal progress indicator and the hide/restore discipline around it.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// A process-wide indicator (spinner, status line) drawn on the terminal.
pub trait ProgressIndicator: Send + Sync {
    /// Hide the indicator and return the visibility it had before.
    fn hide(&self) -> Visibility;

    /// Put the indicator back into `previous`.
    fn restore(&self, previous: Visibility);

    fn visibility(&self) -> Visibility;
}

/// Stand-in when no indicator is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndicator;

impl ProgressIndicator for NoIndicator {
    fn hide(&self) -> Visibility {
        Visibility::Hidden
    }

    fn restore(&self, _previous: Visibility) {}

    fn visibility(&self) -> Visibility {
        Visibility::Hidden
    }
}

/// Keeps an indicator hidden for as long as the guard lives.
///
/// Dropping the guard restores a previously visible indicator, including
/// during unwinding.
pub struct IndicatorGuard<'a> {
    indicator: &'a dyn ProgressIndicator,
    previous: Visibility,
}

impl<'a> IndicatorGuard<'a> {
    pub fn hide(indicator: &'a dyn ProgressIndicator) -> Self {
        let previous = indicator.hide();
        Self {
            indicator,
            previous,
        }
    }

    pub fn previous(&self) -> Visibility {
        self.previous
    }
}

impl Drop for IndicatorGuard<'_> {
    fn drop(&mut self) {
        if self.previous == Visibility::Visible {
            self.indicator.restore(self.previous);
        }
    }
}

/// `indicatif` spinner on stderr.
pub struct SpinnerIndicator {
    bar: ProgressBar,
    state: Mutex<Visibility>,
}

impl SpinnerIndicator {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        Self {
            bar,
            state: Mutex::new(Visibility::Hidden),
        }
    }

    /// Show the spinner with `message`.
    pub fn show(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
        let mut state = self.lock_state();
        if *state == Visibility::Hidden {
            self.draw();
            *state = Visibility::Visible;
        }
    }

    /// Remove the spinner from the terminal.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        if *state == Visibility::Visible {
            self.undraw();
            *state = Visibility::Hidden;
        }
    }

    fn draw(&self) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn undraw(&self) {
        self.bar.disable_steady_tick();
        self.bar.set_draw_target(ProgressDrawTarget::hidden());
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, Visibility> {
        // The state is a plain enum; a poisoned lock still holds a valid value.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SpinnerIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for SpinnerIndicator {
    fn hide(&self) -> Visibility {
        let mut state = self.lock_state();
        let previous = *state;
        if previous == Visibility::Visible {
            self.undraw();
            *state = Visibility::Hidden;
        }
        previous
    }

    fn restore(&self, previous: Visibility) {
        let mut state = self.lock_state();
        if previous == Visibility::Visible && *state == Visibility::Hidden {
            self.draw();
        }
        if previous == Visibility::Hidden && *state == Visibility::Visible {
            self.undraw();
        }
        *state = previous;
    }

    fn visibility(&self) -> Visibility {
        *self.lock_state()
    }
}
