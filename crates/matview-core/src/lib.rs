//! MatView Core - Foundation types for the pose-overlay engine
//!
//! This crate provides the fundamental types used throughout MatView:
//! - Frame-rate and time conversion (FrameRate)
//! - Pose landmark data model (Landmark, PoseSample)
//! - Video/container geometry and contain-fit mapping
//! - Movement phases from the technique analyzer
//! - Analysis sidecar storage

pub mod analysis;
pub mod error;
pub mod geometry;
pub mod phase;
pub mod pose;
pub mod time;

pub use analysis::{AnalysisStore, VideoAnalysis};
pub use error::{MatViewError, Result};
pub use geometry::{FitTransform, Geometry};
pub use phase::{MovementPhase, PhaseKind, PhaseWindow};
pub use pose::{Landmark, PoseSample, LANDMARKS_PER_POSE};
pub use time::FrameRate;
