//! Frame-rate monitor.
//!
//! Counts render ticks and grades throughput once per one-second window.
//! Purely observational: a poor grade is reported to the log, never acted on
//! by the engine itself.

use std::time::Duration;
use tracing::warn;

/// Minimum window over which a frame-rate sample is computed.
const WINDOW: Duration = Duration::from_secs(1);

/// Qualitative throughput classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerformanceGrade {
    #[default]
    Excellent,
    Good,
    Poor,
}

impl PerformanceGrade {
    fn classify(fps: f64) -> Self {
        if fps > 55.0 {
            Self::Excellent
        } else if fps > 45.0 {
            Self::Good
        } else {
            Self::Poor
        }
    }
}

/// Snapshot of monitor state for the diagnostics surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    /// Most recently computed frames per second.
    pub fps: f64,
    /// Running count of windows graded poor.
    pub frame_drops: u64,
    pub grade: PerformanceGrade,
}

/// Samples render-tick frequency and grades it per window.
#[derive(Debug, Default)]
pub struct FrameRateMonitor {
    window_start: Option<Duration>,
    frames_in_window: u32,
    fps: f64,
    grade: PerformanceGrade,
    poor_windows: u64,
}

impl FrameRateMonitor {
    /// Create a monitor with no samples yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one render tick at time `now`.
    ///
    /// Every elapsed window of at least one second recomputes the fps,
    /// regrades it, and resets the counter.
    pub fn record_frame(&mut self, now: Duration) {
        let start = match self.window_start {
            Some(start) => start,
            None => {
                self.window_start = Some(now);
                return;
            }
        };

        self.frames_in_window += 1;

        let elapsed = now.saturating_sub(start);
        if elapsed >= WINDOW {
            self.fps = self.frames_in_window as f64 * 1000.0 / elapsed.as_millis() as f64;
            self.grade = PerformanceGrade::classify(self.fps);
            if self.grade == PerformanceGrade::Poor {
                self.poor_windows += 1;
                warn!(fps = self.fps, "Render rate degraded");
            }
            self.window_start = Some(now);
            self.frames_in_window = 0;
        }
    }

    /// Most recently computed frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Grade of the most recent window.
    pub fn grade(&self) -> PerformanceGrade {
        self.grade
    }

    /// Running count of windows graded poor.
    pub fn poor_windows(&self) -> u64 {
        self.poor_windows
    }

    /// Snapshot for the diagnostics surface.
    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            fps: self.fps,
            frame_drops: self.poor_windows,
            grade: self.grade,
        }
    }

    /// Forget all samples and grades.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
