//! Frame-rate and time conversion for playback sync.
//!
//! Frame rates are rational numbers to avoid floating-point drift when
//! converting between frame indices and playback positions. Positions
//! themselves are `std::time::Duration` values.

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Frame rate as a rational number (e.g., 30000/1001 for 29.97 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 30000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Duration of a single frame, rounded to the nearest nanosecond.
    pub fn frame_duration(self) -> Duration {
        let nanos = Rational64::new(
            self.denominator as i64 * 1_000_000_000,
            self.numerator as i64,
        );
        Duration::from_nanos(nanos.round().to_integer() as u64)
    }

    /// Frame index containing the given playback position (floor).
    pub fn frame_at(self, position: Duration) -> i64 {
        let frames = Rational64::new(
            position.as_nanos() as i64 * self.numerator as i64,
            self.denominator as i64 * 1_000_000_000,
        );
        frames.floor().to_integer()
    }

    /// Playback position at which the given frame begins.
    ///
    /// Rounded up to the first whole nanosecond inside the frame, so
    /// `frame_at(frame_start(f)) == f` holds for every rate.
    pub fn frame_start(self, frame: i64) -> Duration {
        if frame <= 0 {
            return Duration::ZERO;
        }
        let nanos = Rational64::new(
            frame * self.denominator as i64 * 1_000_000_000,
            self.numerator as i64,
        );
        Duration::from_nanos(nanos.ceil().to_integer() as u64)
    }

    // Common source rates for phone and broadcast footage
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}
