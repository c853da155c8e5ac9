//! Pose landmark data model.
//!
//! Landmarks arrive from an external inference collaborator in normalized
//! video coordinates. The engine references sample sequences, it never runs
//! inference or mutates samples after load.

use serde::{Deserialize, Serialize};

/// Number of landmarks the upstream full-body detector emits per pose.
pub const LANDMARKS_PER_POSE: usize = 33;

/// A single body landmark in normalized (0–1) video coordinates.
///
/// `z` is depth relative to the hip midpoint; `confidence` is the detector's
/// visibility score for this point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub confidence: f32,
}

impl Landmark {
    /// Create a new landmark.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            z,
            confidence,
        }
    }
}

/// A timestamped set of landmarks for one analyzed video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseSample {
    /// Presentation timestamp in milliseconds.
    pub timestamp_ms: i64,
    /// Landmarks for this frame, in detector order.
    pub landmarks: Vec<Landmark>,
}

impl PoseSample {
    /// Create a new pose sample.
    pub fn new(timestamp_ms: i64, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            landmarks,
        }
    }
}
