//! Player collaborator contract.
//!
//! The native player is opaque to the engine: commands go out through
//! [`PlayerHandle`], unthrottled status ticks come back as [`PlayerStatus`]
//! values. Status payloads are closed structs — a payload with unknown or
//! missing fields fails to parse instead of silently defaulting.

use matview_core::{MatViewError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Commands the engine issues to the opaque native player.
///
/// A rejected command surfaces as [`MatViewError::PlayerCommand`]; the
/// controller reverts to its last confirmed state rather than assuming the
/// command took effect.
pub trait PlayerHandle {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn seek_to(&mut self, position: Duration) -> Result<()>;
    fn set_rate(&mut self, multiplier: f64) -> Result<()>;
}

/// One status tick from the player, emitted on every native update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerStatus {
    pub position_ms: u64,
    pub duration_ms: u64,
    pub is_playing: bool,
    pub is_buffering: bool,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl PlayerStatus {
    /// Parse a status payload delivered over the JSON bridge.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data)
            .map_err(|e| MatViewError::Serialization(format!("bad player status: {e}")))
    }

    /// Reported position as a duration.
    #[inline]
    pub fn position(&self) -> Duration {
        Duration::from_millis(self.position_ms)
    }

    /// Reported duration as a duration (zero while unknown).
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
