//! Progress reporting during detection passes.
//!
//! Reporting is fire-and-forget: a reporter never influences results and
//! the engine never waits on it.

use std::sync::mpsc::Sender;

use log::info;

/// Sink for `(phase, processed, total)` status updates.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, phase: &str, processed: usize, total: usize);
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _phase: &str, _processed: usize, _total: usize) {}
}

/// Renders updates through the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, phase: &str, processed: usize, total: usize) {
        if processed == 0 {
            info!("Trying out {total} exons for {phase}...");
        } else {
            info!(
                "{phase}: {processed}/{total} exons tested ({:.0}%)",
                percent(processed, total)
            );
        }
    }
}

/// Adapts any `Fn(phase, processed, total)` closure.
pub struct CallbackProgress<F>(pub F);

impl<F> ProgressReporter for CallbackProgress<F>
where
    F: Fn(&str, usize, usize) + Send + Sync,
{
    fn report(&self, phase: &str, processed: usize, total: usize) {
        (self.0)(phase, processed, total)
    }
}

/// One update as sent over a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub phase: String,
    pub processed: usize,
    pub total: usize,
}

impl ProgressReporter for Sender<ProgressUpdate> {
    fn report(&self, phase: &str, processed: usize, total: usize) {
        // a dropped receiver just means nobody is listening any more
        let _ = self.send(ProgressUpdate {
            phase: phase.to_string(),
            processed,
            total,
        });
    }
}

fn percent(processed: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        processed as f64 * 100.0 / total as f64
    }
}

/// Throttles reports for one pass to roughly every `step_percent` of anchors.
///
/// Always emits `(phase, 0, total)` on creation and `(phase, total, total)`
/// on `finish`.
pub(crate) struct Ticker<'a> {
    reporter: &'a dyn ProgressReporter,
    phase: &'a str,
    total: usize,
    step: usize,
    next: usize,
    last: usize,
}

impl<'a> Ticker<'a> {
    pub(crate) fn start(
        reporter: &'a dyn ProgressReporter,
        phase: &'a str,
        total: usize,
        step_percent: usize,
    ) -> Self {
        let step = (total * step_percent.clamp(1, 100) / 100).max(1);
        reporter.report(phase, 0, total);
        Self {
            reporter,
            phase,
            total,
            step,
            next: step,
            last: 0,
        }
    }

    #[inline]
    pub(crate) fn tick(&mut self, processed: usize) {
        if processed >= self.next && processed < self.total {
            self.reporter.report(self.phase, processed, self.total);
            self.last = processed;
            self.next = processed + self.step;
        }
    }

    pub(crate) fn finish(self) {
        if self.last != self.total || self.total == 0 {
            self.reporter.report(self.phase, self.total, self.total);
        }
    }
}
