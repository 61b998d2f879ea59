//! Batch progress rendering.
//!
//! A side-observer of the completion stream: it only counts completions and
//! never filters or delays them. Rendering is delegated to `indicatif`, whose
//! steady tick thread repaints the bar off the hot path, so a slow terminal
//! cannot backpressure job delivery. When stderr is not a terminal the bar is
//! a no-op (indicatif's default draw-target behavior).

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Cumulative progress over a batch of jobs: spinner, bar, count, percent
/// and ETA derived from the observed completion rate.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Create a progress bar for `total` jobs.
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.blue} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA {eta}",
            )
            .unwrap()
            .progress_chars("=>-"),
        );
        bar.set_message("running queries");
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    /// A bar that renders nowhere. Used by tests and non-interactive runs.
    pub fn hidden(total: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total);
        Self { bar }
    }

    /// Record one completion (success or failure alike).
    pub fn completed(&self) {
        self.bar.inc(1);
    }

    /// Completions recorded so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Hide the bar while `f` writes to the terminal, then redraw it.
    ///
    /// Log lines emitted mid-batch share stderr with the steady tick; without
    /// this they land inside a half-drawn bar.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Stop ticking and leave the final state on screen.
    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
