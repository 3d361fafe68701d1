//! Progress reporting for synthesis runs
//!
//! Observers only render; they never influence scheduling.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives completion signals from the scheduler
pub trait ProgressObserver: Send + Sync {
    /// Called once before any work starts
    fn on_start(&self, _total: usize) {}

    /// Called after each successful chunk; `completed` only ever grows
    fn on_advance(&self, completed: usize, total: usize);

    /// Called once after every task has finished, successfully or not
    fn on_finish(&self) {}
}

/// Observer that ignores every signal
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_advance(&self, _completed: usize, _total: usize) {}
}

/// Terminal progress bar drawn on stderr once a run starts
pub struct ProgressBarObserver {
    bar: ProgressBar,
    visible: bool,
}

impl ProgressBarObserver {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            visible: true,
        }
    }

    /// Observer whose bar is never drawn
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            visible: false,
        }
    }

    /// Handle to the underlying bar, for clearing it around other output
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} chunks complete",
        )
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_start(&self, total: usize) {
        if self.visible {
            self.bar.set_draw_target(ProgressDrawTarget::stderr());
        }
        self.bar.set_style(Self::style());
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn on_advance(&self, completed: usize, _total: usize) {
        self.bar.set_position(completed as u64);
    }

    fn on_finish(&self) {
        self.bar.finish();
    }
}

/// Logger that clears the progress bar while a record is written.
///
/// Log output and the bar share stderr; without this, log lines land in the
/// middle of the bar.
pub struct SuspendingLogger<L> {
    inner: L,
    bar: ProgressBar,
}

impl<L: log::Log> SuspendingLogger<L> {
    pub fn new(inner: L, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }
}

impl<L: log::Log> log::Log for SuspendingLogger<L> {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            self.bar.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}
