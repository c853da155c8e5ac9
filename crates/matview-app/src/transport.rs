//! Simulated player transport for the headless demo.
//!
//! Stands in for the native video player: holds the transport state, reacts
//! to engine commands, and serializes status ticks the way the real bridge
//! would.

use matview_core::Result;
use matview_overlay::PlayerHandle;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Shared state of the simulated native player.
pub struct Transport {
    pub position: Duration,
    pub duration: Duration,
    pub playing: bool,
    pub buffering: bool,
    pub rate: f64,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl Transport {
    /// Create a transport for a video of the given duration and size.
    pub fn new(duration: Duration, natural_width: u32, natural_height: u32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            position: Duration::ZERO,
            duration,
            playing: false,
            buffering: false,
            rate: 1.0,
            natural_width,
            natural_height,
        }))
    }

    /// Advance simulated playback by `dt` of wall time.
    pub fn advance(&mut self, dt: Duration) {
        if self.playing && !self.buffering {
            self.position = (self.position + dt.mul_f64(self.rate)).min(self.duration);
        }
    }

    /// Serialize one status tick as the native bridge would.
    pub fn status_json(&self) -> String {
        serde_json::json!({
            "position_ms": self.position.as_millis() as u64,
            "duration_ms": self.duration.as_millis() as u64,
            "is_playing": self.playing,
            "is_buffering": self.buffering,
            "natural_width": self.natural_width,
            "natural_height": self.natural_height,
        })
        .to_string()
    }
}

/// Command side of the simulated player, handed to the sync controller.
pub struct ScriptedPlayer(pub Rc<RefCell<Transport>>);

impl PlayerHandle for ScriptedPlayer {
    fn play(&mut self) -> Result<()> {
        self.0.borrow_mut().playing = true;
        debug!("transport: play");
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.0.borrow_mut().playing = false;
        debug!("transport: pause");
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        let mut t = self.0.borrow_mut();
        t.position = position.min(t.duration);
        debug!(position_ms = position.as_millis() as u64, "transport: seek");
        Ok(())
    }

    fn set_rate(&mut self, multiplier: f64) -> Result<()> {
        self.0.borrow_mut().rate = multiplier;
        debug!(multiplier, "transport: rate");
        Ok(())
    }
}
