//! Progress and message reporting for long-running algorithms.
//!
//! Algorithms take a `&dyn Logger` and report coarse percentages through it.
//! Reporting is observational only and never changes results. Pass
//! [`NullLogger`] to discard everything.
//!
//! # Example
//!
//! ```
//! use facetkit::algo::logger::{Logger, ProgressLogger};
//!
//! let logger = ProgressLogger::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! });
//!
//! logger.start_progress("Processing", 1000, 10, 0, 100);
//! for i in 0..1000 {
//!     logger.progress(i);
//! }
//! logger.end_progress();
//! ```

use std::sync::Mutex;

/// Sink for progress percentages and messages.
///
/// Methods take `&self` so a logger can be shared by parallel workers;
/// implementations synchronize internally.
pub trait Logger: Sync {
    /// Report a message at the given overall percentage (0-100).
    fn log(&self, percent: u32, message: &str);

    /// Start a progress section of `size` steps mapped to
    /// `start_percent..=end_percent`, reporting every `percent_step` percent.
    fn start_progress(
        &self,
        message: &str,
        size: usize,
        percent_step: u32,
        start_percent: u32,
        end_percent: u32,
    );

    /// Report that step `n` of the current section was reached.
    fn progress(&self, n: usize);

    /// Close the current progress section, reporting its end percentage.
    fn end_progress(&self);
}

/// A logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _percent: u32, _message: &str) {}

    fn start_progress(&self, _: &str, _: usize, _: u32, _: u32, _: u32) {}

    fn progress(&self, _n: usize) {}

    fn end_progress(&self) {}
}

#[derive(Debug, Default)]
struct Section {
    active: bool,
    message: String,
    size: usize,
    step: usize,
    percent_step: u32,
    start_percent: u32,
    end_percent: u32,
    last_bucket: usize,
    last_percent: Option<u32>,
}

/// Turns step counts into percentage reports, at most one per bucket.
///
/// Buckets only move forward, so reports are monotonic even when steps
/// arrive out of order from several threads.
#[derive(Debug, Default)]
struct ProgressTracker {
    section: Mutex<Section>,
}

impl ProgressTracker {
    fn start(&self, message: &str, size: usize, percent_step: u32, start: u32, end: u32) {
        let percent_step = percent_step.max(1);
        let end = end.clamp(start, 100);
        let buckets = ((end - start) / percent_step).max(1) as usize;
        let step = match (size + 1) / buckets {
            0 => size.max(1),
            s => s,
        };

        let mut section = self.lock();
        *section = Section {
            active: true,
            message: message.to_string(),
            size,
            step,
            percent_step,
            start_percent: start,
            end_percent: end,
            last_bucket: 0,
            last_percent: None,
        };
    }

    /// Percentage and message to report for step `n`, if a new bucket was
    /// reached.
    fn advance(&self, n: usize) -> Option<(u32, String)> {
        let mut section = self.lock();
        if !section.active {
            return None;
        }
        let bucket = n / section.step;
        if bucket <= section.last_bucket {
            return None;
        }
        section.last_bucket = bucket;
        let percent = (section.start_percent as usize + bucket * section.percent_step as usize)
            .min(section.end_percent as usize) as u32;
        if section.last_percent.is_some_and(|last| percent <= last) {
            return None;
        }
        section.last_percent = Some(percent);
        Some((percent, section.message.clone()))
    }

    fn end(&self) -> Option<(u32, String)> {
        let size = self.lock().size;
        let report = self.advance(size.max(1) * 2);
        self.lock().active = false;
        report
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Section> {
        // A panic while holding the lock leaves the section consistent
        self.section.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A logger forwarding to a `(current, total, message)` callback.
///
/// Messages and progress are reported as `current` percent of
/// `total = 100`.
pub struct ProgressLogger {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
    tracker: ProgressTracker,
}

impl ProgressLogger {
    /// Create a new progress logger with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            tracker: ProgressTracker::default(),
        }
    }
}

impl std::fmt::Debug for ProgressLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressLogger").finish_non_exhaustive()
    }
}

impl Logger for ProgressLogger {
    fn log(&self, percent: u32, message: &str) {
        (self.callback)(percent as usize, 100, message);
    }

    fn start_progress(&self, message: &str, size: usize, percent_step: u32, start: u32, end: u32) {
        self.tracker.start(message, size, percent_step, start, end);
    }

    fn progress(&self, n: usize) {
        if let Some((percent, message)) = self.tracker.advance(n) {
            self.log(percent, &message);
        }
    }

    fn end_progress(&self) {
        if let Some((percent, message)) = self.tracker.end() {
            self.log(percent, &message);
        }
    }
}

/// A logger writing to the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogLogger {
    tracker: ProgressTracker,
}

impl LogLogger {
    /// Create a new logger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for LogLogger {
    fn log(&self, percent: u32, message: &str) {
        log::info!("[{:>3}%] {}", percent, message);
    }

    fn start_progress(&self, message: &str, size: usize, percent_step: u32, start: u32, end: u32) {
        self.tracker.start(message, size, percent_step, start, end);
    }

    fn progress(&self, n: usize) {
        if let Some((percent, message)) = self.tracker.advance(n) {
            self.log(percent, &message);
        }
    }

    fn end_progress(&self) {
        if let Some((percent, message)) = self.tracker.end() {
            self.log(percent, &message);
        }
    }
}
