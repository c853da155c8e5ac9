//! Integration tests for the overlay sync pipeline.
//!
//! Exercises cross-crate interactions between matview-core, matview-rt,
//! and matview-overlay with a scripted fake player.

use matview_core::{
    FrameRate, Geometry, Landmark, MovementPhase, PhaseKind, PoseSample, Result, VideoAnalysis,
};
use matview_overlay::{
    PlayerHandle, PlayerStatus, RenderFrame, StepDirection, SyncController, SyncState,
};
use matview_rt::ManualClock;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

const MS: Duration = Duration::from_millis(1);

// ── Helpers ────────────────────────────────────────────────────

#[derive(Default)]
struct Commands {
    seeks: Vec<Duration>,
    rates: Vec<f64>,
}

struct FakePlayer(Rc<RefCell<Commands>>);

impl PlayerHandle for FakePlayer {
    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.0.borrow_mut().seeks.push(position);
        Ok(())
    }

    fn set_rate(&mut self, multiplier: f64) -> Result<()> {
        self.0.borrow_mut().rates.push(multiplier);
        Ok(())
    }
}

fn analysis() -> VideoAnalysis {
    let samples = (0..90i64)
        .map(|i| PoseSample::new(i * 1_000, vec![Landmark::new(0.5, 0.5, 0.0, 0.95)]))
        .collect();
    VideoAnalysis {
        asset_id: "dual-meet-44".into(),
        filename: "dual-meet-44.mp4".into(),
        duration_ms: 90_000,
        frame_rate: FrameRate::FPS_30,
        width: 1920,
        height: 1080,
        samples,
        phases: vec![MovementPhase {
            kind: PhaseKind::Sprawl,
            start_frame: 1_800,
            end_frame: 1_950,
        }],
    }
}

fn rig() -> (SyncController, Rc<ManualClock>, Rc<RefCell<Commands>>) {
    let clock = Rc::new(ManualClock::new());
    let commands = Rc::new(RefCell::new(Commands::default()));
    let mut controller = SyncController::new(clock.clone());
    controller.attach_analysis(Box::new(FakePlayer(commands.clone())), &analysis(), 400, 400);
    (controller, clock, commands)
}

fn status(position_ms: u64, is_playing: bool, is_buffering: bool) -> PlayerStatus {
    PlayerStatus {
        position_ms,
        duration_ms: 90_000,
        is_playing,
        is_buffering,
        natural_width: 1920,
        natural_height: 1080,
    }
}

// ── Full session ───────────────────────────────────────────────

#[test]
fn scripted_session_end_to_end() {
    let (mut controller, clock, commands) = rig();

    let frames: Rc<RefCell<Vec<(u64, usize)>>> = Rc::default();
    let sink = frames.clone();
    controller.subscribe(move |frame: RenderFrame<'_>| {
        sink.borrow_mut()
            .push((frame.position.as_millis() as u64, frame.landmarks.len()));
    });

    // Playback begins.
    controller.on_player_status(status(0, true, false));
    assert_eq!(controller.state(), SyncState::Playing);

    // A scrub burst collapses into one late seek.
    for i in 1..=6u64 {
        clock.advance(15 * MS);
        controller.seek(Duration::from_secs(i * 10)).unwrap();
        controller.tick();
    }
    assert!(commands.borrow().seeks.is_empty());
    clock.advance(120 * MS);
    controller.tick();
    assert_eq!(commands.borrow().seeks.as_slice(), &[Duration::from_secs(60)]);

    // The player lands on the target; playback resumes.
    clock.advance(30 * MS);
    controller.on_player_status(status(60_000, true, false));
    assert_eq!(controller.state(), SyncState::Playing);
    assert_eq!(controller.playback().position, Duration::from_secs(60));

    // The position lands inside the labelled sprawl window (frames
    // 1800..1950 at 30fps is 60s..65s).
    assert_eq!(
        controller.active_phase().map(|p| p.kind),
        Some(PhaseKind::Sprawl)
    );

    // Buffering interrupts and clears.
    clock.advance(30 * MS);
    controller.on_player_status(status(60_200, true, true));
    assert!(matches!(controller.state(), SyncState::Buffering { .. }));
    clock.advance(30 * MS);
    controller.on_player_status(status(60_200, true, false));
    assert_eq!(controller.state(), SyncState::Playing);

    // Every accepted update produced a frame with transformed landmarks.
    let frames = frames.borrow();
    assert!(!frames.is_empty());
    assert!(frames.iter().all(|&(_, landmarks)| landmarks == 1));
}

#[test]
fn frame_steps_collapse_and_clamp() {
    let (mut controller, clock, commands) = rig();
    controller.on_player_status(status(0, false, false));

    for _ in 0..4 {
        controller.step_frame(StepDirection::Backward).unwrap();
        clock.advance(5 * MS);
    }
    clock.advance(200 * MS);
    controller.tick();

    // Four backward steps at position zero stay clamped at zero.
    assert_eq!(commands.borrow().seeks.as_slice(), &[Duration::ZERO]);
}

#[test]
fn speed_change_reaches_player_without_state_change() {
    let (mut controller, clock, commands) = rig();
    controller.on_player_status(status(0, true, false));
    let before = controller.state();

    controller.set_speed(4).unwrap();
    clock.advance(50 * MS);
    controller.tick();

    assert_eq!(commands.borrow().rates.as_slice(), &[2.0]);
    assert_eq!(controller.state(), before);
    assert_eq!(controller.playback().rate_index, 4);
}

#[test]
fn analysis_round_trips_through_bridge_json() {
    let analysis = analysis();
    let json = serde_json::to_string(&analysis).unwrap();
    let loaded = VideoAnalysis::from_json(json.as_bytes()).unwrap();
    assert_eq!(loaded.samples.len(), 90);
    assert_eq!(loaded.frame_rate, FrameRate::FPS_30);
}

#[test]
fn detached_controller_ignores_the_world() {
    let (mut controller, clock, commands) = rig();
    let count = Rc::new(RefCell::new(0usize));
    let sink = count.clone();
    controller.subscribe(move |_frame: RenderFrame<'_>| {
        *sink.borrow_mut() += 1;
    });

    controller.on_player_status(status(0, true, false));
    controller.seek(Duration::from_secs(9)).unwrap();
    controller.detach();

    clock.advance(Duration::from_secs(600));
    controller.tick();
    controller.on_player_status(status(1_000, true, false));
    controller.tick();

    assert_eq!(*count.borrow(), 1);
    assert!(commands.borrow().seeks.is_empty());
}

#[test]
fn reattach_replaces_samples_wholesale() {
    let (mut controller, clock, commands) = rig();
    controller.on_player_status(status(0, true, false));

    // New load: different sample sequence, same subscriber set.
    let samples: Arc<[PoseSample]> = Arc::from(vec![PoseSample::new(
        500,
        vec![
            Landmark::new(0.1, 0.1, 0.0, 1.0),
            Landmark::new(0.9, 0.9, 0.0, 1.0),
        ],
    )]);
    controller.attach(
        Box::new(FakePlayer(commands.clone())),
        samples,
        Geometry::new(640, 480, 640, 480),
        FrameRate::FPS_60,
    );

    let frames: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = frames.clone();
    controller.subscribe(move |frame: RenderFrame<'_>| {
        sink.borrow_mut().push(frame.landmarks.len());
    });

    clock.advance(50 * MS);
    controller.on_player_status(status(400, true, false));
    assert_eq!(frames.borrow().as_slice(), &[2]);
}
