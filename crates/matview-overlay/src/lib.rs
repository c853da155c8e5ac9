//! MatView Overlay - Time-synchronized pose overlay engine
//!
//! Keeps pose landmarks in lock-step with a scrubbing video player:
//! - Nearest-timestamp lookup over the analyzed sample sequence
//! - Normalized→screen coordinate projection with a short-TTL memo cache
//! - A sync controller that throttles inbound player status to the display
//!   refresh rate and debounces outbound seeks
//!
//! The player itself is an opaque collaborator behind [`PlayerHandle`];
//! this crate never decodes or renders anything.

pub mod controller;
pub mod index;
pub mod player;
pub mod transform;

pub use controller::{
    PlaybackState, RenderFrame, Resume, StepDirection, SubscriptionId, SyncController, SyncState,
    NORMAL_SPEED_INDEX, SPEED_STEPS,
};
pub use index::PoseFrameIndex;
pub use player::{PlayerHandle, PlayerStatus};
pub use transform::{project, CoordinateTransformer, ScreenLandmark};
