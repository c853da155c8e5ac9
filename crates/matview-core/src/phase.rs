//! Movement phases from the technique analyzer.
//!
//! The analyzer labels spans of source frames with the wrestling movement it
//! recognized; the engine converts those spans to time windows at the
//! configured source frame rate and treats them as read-only.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::time::FrameRate;

/// Movement phase categories recognized by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Stance,
    LevelChange,
    Penetration,
    Takedown,
    Sprawl,
    Scramble,
    Control,
    Escape,
}

/// A span of source frames labelled with a movement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovementPhase {
    pub kind: PhaseKind,
    /// First frame of the phase (inclusive).
    pub start_frame: i64,
    /// Last frame of the phase (exclusive).
    pub end_frame: i64,
}

impl MovementPhase {
    /// Convert the frame span to a playback time window at the given rate.
    pub fn to_window(&self, rate: FrameRate) -> PhaseWindow {
        PhaseWindow {
            kind: self.kind,
            start: rate.frame_start(self.start_frame),
            end: rate.frame_start(self.end_frame),
        }
    }
}

/// A movement phase expressed as a playback time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseWindow {
    pub kind: PhaseKind,
    /// Start time (inclusive).
    pub start: Duration,
    /// End time (exclusive).
    pub end: Duration,
}

impl PhaseWindow {
    /// Check if a playback position falls within this window.
    #[inline]
    pub fn contains(&self, position: Duration) -> bool {
        position >= self.start && position < self.end
    }
}
