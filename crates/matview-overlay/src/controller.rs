//! Playback sync controller.
//!
//! Orchestrates the overlay pipeline: player status events come in through a
//! 60 Hz throttle, drive the playback state machine, and fan out through
//! pose lookup and coordinate transform into one render payload per accepted
//! update. User seeks flow the opposite direction through a debounce so
//! scrub gestures collapse into a single late seek.
//!
//! All deferred work fires inside [`SyncController::tick`], which the host
//! loop calls once per turn; nothing here blocks or spawns.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use matview_core::{
    FitTransform, FrameRate, Geometry, MatViewError, PhaseWindow, PoseSample, Result,
    VideoAnalysis,
};
use matview_rt::{
    CacheStats, Clock, Debounce, FrameRateMonitor, PerformanceMetrics, Throttle, TimerQueue,
    SWEEP_INTERVAL,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::index::PoseFrameIndex;
use crate::player::{PlayerHandle, PlayerStatus};
use crate::transform::{CoordinateTransformer, ScreenLandmark};

/// Allowed playback-rate multipliers, selected by index.
pub const SPEED_STEPS: [f64; 5] = [0.25, 0.5, 1.0, 1.5, 2.0];

/// Index of the normal-speed entry in [`SPEED_STEPS`].
pub const NORMAL_SPEED_INDEX: usize = 2;

/// Inbound status gate: one state mutation per display refresh (~60 Hz).
const STATUS_INTERVAL: Duration = Duration::from_micros(16_667);

/// Outbound seek gate: a scrub gesture collapses into a single late seek.
const SEEK_DEBOUNCE: Duration = Duration::from_millis(100);

/// Observable playback state, mutated only by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub position: Duration,
    /// Zero while unknown.
    pub duration: Duration,
    pub is_playing: bool,
    pub is_buffering: bool,
    /// Index into [`SPEED_STEPS`].
    pub rate_index: usize,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            duration: Duration::ZERO,
            is_playing: false,
            is_buffering: false,
            rate_index: NORMAL_SPEED_INDEX,
        }
    }
}

/// Play/pause state remembered across seeking and buffering interruptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Playing,
    Paused,
}

impl Resume {
    fn from_state(state: SyncState) -> Self {
        match state {
            SyncState::Playing => Self::Playing,
            SyncState::Seeking { resume } | SyncState::Buffering { resume } => resume,
            _ => Self::Paused,
        }
    }

    fn into_state(self) -> SyncState {
        match self {
            Self::Playing => SyncState::Playing,
            Self::Paused => SyncState::Paused,
        }
    }
}

/// Controller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No player metadata yet.
    Idle,
    /// Metadata received, not yet playing.
    Loaded,
    Playing,
    Paused,
    /// A user seek or frame-step is in flight; restored once the player
    /// confirms the new position.
    Seeking { resume: Resume },
    /// The player reported a buffering stall; restored when it clears.
    Buffering { resume: Resume },
}

/// Direction of a single-frame step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Forward,
    Backward,
}

/// Identifies a render-frame subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

/// One overlay frame, emitted to subscribers on every accepted position
/// update — with an empty landmark slice when no pose is known for the
/// position, never suppressed.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub position: Duration,
    pub pose: Option<&'a PoseSample>,
    pub landmarks: &'a [ScreenLandmark],
}

type RenderSink = Box<dyn FnMut(RenderFrame<'_>)>;

/// Events driven by the controller's timer queue.
enum ControllerEvent {
    SweepCache,
}

/// Top-level orchestrator binding a player to the overlay pipeline.
pub struct SyncController {
    clock: Rc<dyn Clock>,
    player: Option<Box<dyn PlayerHandle>>,

    index: PoseFrameIndex,
    phases: Vec<PhaseWindow>,
    geometry: Option<Geometry>,
    fit: FitTransform,
    frame_rate: FrameRate,

    state: SyncState,
    playback: PlaybackState,

    status_gate: Throttle<PlayerStatus>,
    seek_gate: Debounce<Duration>,
    timers: TimerQueue<ControllerEvent>,
    inflight_seek: Option<Duration>,

    transformer: CoordinateTransformer,
    monitor: FrameRateMonitor,
    subscribers: Vec<(SubscriptionId, RenderSink)>,
    /// Last successfully transformed landmark set, retained so a geometry
    /// glitch freezes the overlay instead of emitting garbage coordinates.
    last_landmarks: Arc<Vec<ScreenLandmark>>,
}

impl SyncController {
    /// Create a detached controller.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            player: None,
            index: PoseFrameIndex::empty(),
            phases: Vec::new(),
            geometry: None,
            fit: FitTransform::IDENTITY,
            frame_rate: FrameRate::default(),
            state: SyncState::Idle,
            playback: PlaybackState::default(),
            status_gate: Throttle::new(STATUS_INTERVAL),
            seek_gate: Debounce::new(SEEK_DEBOUNCE),
            timers: TimerQueue::new(),
            inflight_seek: None,
            transformer: CoordinateTransformer::new(),
            monitor: FrameRateMonitor::new(),
            subscribers: Vec::new(),
            last_landmarks: Arc::new(Vec::new()),
        }
    }

    // ── Attachment lifecycle ────────────────────────────────────

    /// Bind a player instance plus its analyzed pose samples and geometry.
    ///
    /// Replaces any previous attachment wholesale; subscriptions survive.
    pub fn attach(
        &mut self,
        player: Box<dyn PlayerHandle>,
        samples: Arc<[PoseSample]>,
        geometry: Geometry,
        frame_rate: FrameRate,
    ) {
        self.detach();
        let now = self.clock.now();

        self.player = Some(player);
        self.index = PoseFrameIndex::new(samples);
        self.geometry = Some(geometry);
        self.frame_rate = frame_rate;
        self.refresh_fit();
        self.timers
            .schedule(now, SWEEP_INTERVAL, ControllerEvent::SweepCache);

        info!(samples = self.index.len(), %frame_rate, "Attached to player");
    }

    /// Bind a player using a loaded analysis sidecar and container size.
    pub fn attach_analysis(
        &mut self,
        player: Box<dyn PlayerHandle>,
        analysis: &VideoAnalysis,
        container_width: u32,
        container_height: u32,
    ) {
        let samples: Arc<[PoseSample]> = Arc::from(analysis.samples.clone());
        let geometry = Geometry::new(
            analysis.width,
            analysis.height,
            container_width,
            container_height,
        );
        self.attach(player, samples, geometry, analysis.frame_rate);
        self.phases = analysis
            .phases
            .iter()
            .map(|p| p.to_window(analysis.frame_rate))
            .collect();
        self.playback.duration = Duration::from_millis(analysis.duration_ms.max(0) as u64);
    }

    /// Drop the player and cancel every pending timer and gate.
    ///
    /// After this returns, advancing time and ticking produces no further
    /// callbacks or sweeps.
    pub fn detach(&mut self) {
        if self.player.is_some() {
            info!("Detached from player");
        }
        self.player = None;
        self.status_gate.cancel();
        self.seek_gate.cancel();
        self.timers.clear();
        self.inflight_seek = None;
        self.index = PoseFrameIndex::empty();
        self.phases.clear();
        self.geometry = None;
        self.fit = FitTransform::IDENTITY;
        self.state = SyncState::Idle;
        self.playback = PlaybackState::default();
        self.transformer.clear();
        self.monitor.reset();
        self.last_landmarks = Arc::new(Vec::new());
    }

    /// Update the rendering container size (e.g. on rotation or resize).
    pub fn set_container_size(&mut self, width: u32, height: u32) {
        if let Some(g) = self.geometry.as_mut() {
            g.container_width = width;
            g.container_height = height;
        }
        self.refresh_fit();
    }

    // ── Subscriptions ───────────────────────────────────────────

    /// Register a render-frame sink. Frames arrive at most at ~60 Hz.
    pub fn subscribe<F>(&mut self, sink: F) -> SubscriptionId
    where
        F: FnMut(RenderFrame<'_>) + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.push((id, Box::new(sink)));
        id
    }

    /// Remove a previously registered sink.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    // ── Inbound events ──────────────────────────────────────────

    /// Feed one raw player status tick through the 60 Hz gate.
    pub fn on_player_status(&mut self, status: PlayerStatus) {
        if self.player.is_none() {
            debug!("Status event while detached; ignoring");
            return;
        }
        let now = self.clock.now();
        if let Some(accepted) = self.status_gate.offer(now, status) {
            self.apply_status(now, accepted);
        }
    }

    /// Drive deferred work: coalesced status updates, debounced seeks, and
    /// periodic cache sweeps. Call once per host loop turn.
    pub fn tick(&mut self) {
        let now = self.clock.now();

        if let Some(status) = self.status_gate.poll(now) {
            self.apply_status(now, status);
        }

        if let Some(target) = self.seek_gate.poll(now) {
            self.issue_seek(target);
        }

        for event in self.timers.poll(now) {
            match event {
                ControllerEvent::SweepCache => {
                    let removed = self.transformer.sweep(now);
                    if removed > 0 {
                        debug!(removed, "Transform cache swept");
                    }
                    self.timers
                        .schedule(now, SWEEP_INTERVAL, ControllerEvent::SweepCache);
                }
            }
        }
    }

    // ── User commands ───────────────────────────────────────────

    /// Toggle play/pause via the player, updating state only on success.
    pub fn play_pause(&mut self) -> Result<()> {
        let player = self.player.as_mut().ok_or(MatViewError::NotAttached)?;
        if matches!(self.state, SyncState::Playing) {
            player.pause()?;
            self.state = SyncState::Paused;
            self.playback.is_playing = false;
        } else {
            player.play()?;
            self.state = SyncState::Playing;
            self.playback.is_playing = true;
        }
        Ok(())
    }

    /// Request a seek. Rapid calls collapse into a single late seek.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        if self.player.is_none() {
            return Err(MatViewError::NotAttached);
        }
        let now = self.clock.now();
        let target = self.clamp_position(position);

        if !matches!(self.state, SyncState::Seeking { .. }) {
            let resume = Resume::from_state(self.state);
            self.state = SyncState::Seeking { resume };
        }
        self.seek_gate.offer(now, target);
        Ok(())
    }

    /// Step a single source frame forward or backward, clamped to
    /// `[0, duration]`. Consecutive steps accumulate onto the pending seek.
    pub fn step_frame(&mut self, direction: StepDirection) -> Result<()> {
        let frame = self.frame_rate.frame_duration();
        let base = self
            .seek_gate
            .pending()
            .copied()
            .unwrap_or(self.playback.position);
        let target = match direction {
            StepDirection::Forward => base + frame,
            StepDirection::Backward => base.saturating_sub(frame),
        };
        self.seek(target)
    }

    /// Select a playback-rate multiplier from [`SPEED_STEPS`] by index.
    ///
    /// Never touches the state machine.
    pub fn set_speed(&mut self, index: usize) -> Result<()> {
        let multiplier = *SPEED_STEPS.get(index).ok_or_else(|| {
            MatViewError::InvalidParameter(format!("speed index {index} out of range"))
        })?;
        let player = self.player.as_mut().ok_or(MatViewError::NotAttached)?;
        player.set_rate(multiplier)?;
        self.playback.rate_index = index;
        debug!(multiplier, "Playback rate changed");
        Ok(())
    }

    // ── Diagnostics ─────────────────────────────────────────────

    /// Current state machine state.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Current playback state snapshot.
    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Movement phase containing the current position, if any.
    pub fn active_phase(&self) -> Option<PhaseWindow> {
        let position = self.playback.position;
        self.phases.iter().copied().find(|w| w.contains(position))
    }

    /// Render throughput metrics.
    pub fn performance_metrics(&self) -> PerformanceMetrics {
        self.monitor.metrics()
    }

    /// Transform cache occupancy.
    pub fn cache_stats(&self) -> CacheStats {
        self.transformer.cache_stats()
    }

    // ── Internals ───────────────────────────────────────────────

    fn apply_status(&mut self, now: Duration, status: PlayerStatus) {
        self.playback.duration = status.duration();

        if status.natural_width > 0 && status.natural_height > 0 {
            if let Some(g) = self.geometry.as_mut() {
                g.video_width = status.natural_width;
                g.video_height = status.natural_height;
            }
            self.refresh_fit();
        }

        if self.state == SyncState::Idle
            && (status.duration_ms > 0 || status.natural_width > 0)
        {
            self.state = SyncState::Loaded;
            info!(duration_ms = status.duration_ms, "Player metadata received");
        }

        // Seek confirmation: the reported position landed within one source
        // frame of the requested target.
        if let Some(target) = self.inflight_seek {
            let reported = status.position();
            let diff = if reported > target {
                reported - target
            } else {
                target - reported
            };
            if diff <= self.frame_rate.frame_duration() {
                self.inflight_seek = None;
                if let SyncState::Seeking { resume } = self.state {
                    self.state = resume.into_state();
                    debug!(position_ms = status.position_ms, "Seek confirmed");
                }
            }
        }

        // Buffering round trip: remember the interrupted state, restore it
        // when the stall clears.
        match (status.is_buffering, self.state) {
            (true, SyncState::Idle) | (true, SyncState::Buffering { .. }) => {}
            (true, current) => {
                self.state = SyncState::Buffering {
                    resume: Resume::from_state(current),
                };
            }
            (false, SyncState::Buffering { resume }) => {
                self.state = resume.into_state();
            }
            (false, _) => {}
        }

        // Player-reported play/pause flags, outside interruptions.
        match self.state {
            SyncState::Loaded | SyncState::Paused if status.is_playing => {
                self.state = SyncState::Playing;
            }
            SyncState::Playing if !status.is_playing => {
                self.state = SyncState::Paused;
            }
            _ => {}
        }

        let mut position = status.position();
        if !self.playback.duration.is_zero() {
            position = position.min(self.playback.duration);
        }
        self.playback.position = position;
        self.playback.is_playing = status.is_playing;
        self.playback.is_buffering = status.is_buffering;

        self.monitor.record_frame(now);
        self.emit_frame(now);
    }

    fn emit_frame(&mut self, now: Duration) {
        let position = self.playback.position;
        let pose = self.index.nearest_at(position);

        let landmarks: Arc<Vec<ScreenLandmark>> = match (pose, self.geometry) {
            (Some(sample), Some(geometry)) => match geometry.validate() {
                Ok(()) => {
                    let projected =
                        self.transformer
                            .transform(now, &sample.landmarks, &geometry, &self.fit);
                    self.last_landmarks = projected.clone();
                    projected
                }
                Err(e) => {
                    debug!(error = %e, "Transform skipped; retaining previous overlay");
                    self.last_landmarks.clone()
                }
            },
            (Some(_), None) => self.last_landmarks.clone(),
            (None, _) => Arc::new(Vec::new()),
        };

        let frame = RenderFrame {
            position,
            pose,
            landmarks: &landmarks,
        };
        for (_, sink) in self.subscribers.iter_mut() {
            sink(frame);
        }
    }

    fn issue_seek(&mut self, target: Duration) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        self.inflight_seek = Some(target);
        match player.seek_to(target) {
            Ok(()) => {
                debug!(target_ms = target.as_millis() as u64, "Seek issued");
            }
            Err(e) => {
                // The player rejected the command; fall back to the last
                // confirmed state so the machine never sticks in Seeking.
                warn!(error = %e, "Seek command failed; reverting");
                self.inflight_seek = None;
                if let SyncState::Seeking { resume } = self.state {
                    self.state = resume.into_state();
                }
            }
        }
    }

    fn clamp_position(&self, position: Duration) -> Duration {
        if self.playback.duration.is_zero() {
            position
        } else {
            position.min(self.playback.duration)
        }
    }

    fn refresh_fit(&mut self) {
        if let Some(g) = self.geometry {
            if g.validate().is_ok() {
                self.fit = g.fit();
            }
        }
    }
}
