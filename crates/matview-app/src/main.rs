//! MatView Demo - Headless scripted session against the sync engine
//!
//! Composition root: builds the one process-wide controller, attaches a
//! simulated player, and drives a scripted session (playback, a scrub burst,
//! a buffering stall, frame steps, a speed change) while logging what the
//! overlay pipeline emits.

mod transport;

use anyhow::Result;
use matview_core::{
    FrameRate, Landmark, MovementPhase, PhaseKind, PoseSample, VideoAnalysis, LANDMARKS_PER_POSE,
};
use matview_overlay::{PlayerStatus, RenderFrame, StepDirection, SyncController};
use matview_rt::ManualClock;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use transport::{ScriptedPlayer, Transport};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("MatView demo starting...");

    // Load an analysis sidecar if one was given, otherwise synthesize one.
    let analysis = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "Loading analysis sidecar");
            VideoAnalysis::from_file(&path)?
        }
        None => synthetic_analysis(),
    };

    let clock = Rc::new(ManualClock::new());
    let mut controller = SyncController::new(clock.clone());

    let transport = Transport::new(
        Duration::from_millis(analysis.duration_ms.max(0) as u64),
        analysis.width,
        analysis.height,
    );
    // Phone-sized container: the engine letterboxes the video into it.
    controller.attach_analysis(
        Box::new(ScriptedPlayer(transport.clone())),
        &analysis,
        375,
        667,
    );

    let frames = Rc::new(RefCell::new(0u64));
    let counter = frames.clone();
    controller.subscribe(move |frame: RenderFrame<'_>| {
        *counter.borrow_mut() += 1;
        if *counter.borrow() % 60 == 0 {
            info!(
                position_ms = frame.position.as_millis() as u64,
                landmarks = frame.landmarks.len(),
                "Overlay frame"
            );
        }
    });

    // Scripted session.
    controller.play_pause()?;
    run_for(&mut controller, &clock, &transport, Duration::from_secs(2))?;

    info!("Scrub burst");
    for i in 1..=8u64 {
        controller.seek(Duration::from_secs(10 + i))?;
        run_for(&mut controller, &clock, &transport, Duration::from_millis(12))?;
    }
    run_for(&mut controller, &clock, &transport, Duration::from_millis(250))?;

    info!("Buffering stall");
    transport.borrow_mut().buffering = true;
    run_for(&mut controller, &clock, &transport, Duration::from_millis(300))?;
    transport.borrow_mut().buffering = false;
    run_for(&mut controller, &clock, &transport, Duration::from_millis(200))?;

    info!("Frame stepping");
    controller.play_pause()?;
    controller.step_frame(StepDirection::Forward)?;
    controller.step_frame(StepDirection::Forward)?;
    run_for(&mut controller, &clock, &transport, Duration::from_millis(250))?;

    info!("Half-speed review");
    controller.set_speed(1)?;
    controller.play_pause()?;
    run_for(&mut controller, &clock, &transport, Duration::from_secs(2))?;

    if let Some(phase) = controller.active_phase() {
        info!(kind = ?phase.kind, "Active movement phase");
    }

    let metrics = controller.performance_metrics();
    let cache = controller.cache_stats();
    info!(
        fps = metrics.fps,
        frame_drops = metrics.frame_drops,
        grade = ?metrics.grade,
        "Session metrics"
    );
    info!(
        size = cache.size,
        max_size = cache.max_size,
        utilization = cache.utilization_percent as f64,
        "Transform cache"
    );
    info!(frames = *frames.borrow(), "Render frames delivered");

    controller.detach();
    info!("MatView demo finished");
    Ok(())
}

/// Pump the simulation for `total`, feeding the controller ~250 Hz native
/// status ticks so the 60 Hz inbound gate has something to throttle.
fn run_for(
    controller: &mut SyncController,
    clock: &Rc<ManualClock>,
    transport: &Rc<RefCell<Transport>>,
    total: Duration,
) -> Result<()> {
    const STEP: Duration = Duration::from_millis(4);
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        clock.advance(STEP);
        transport.borrow_mut().advance(STEP);
        let json = transport.borrow().status_json();
        controller.on_player_status(PlayerStatus::from_json(&json)?);
        controller.tick();
        elapsed += STEP;
    }
    Ok(())
}

/// A 90-second match analyzed at 30 Hz, with a gently swaying pose.
fn synthetic_analysis() -> VideoAnalysis {
    let samples = (0..2_700i64)
        .map(|i| {
            let t = i as f32 / 30.0;
            let sway = (t * 0.8).sin() * 0.05;
            let landmarks = (0..LANDMARKS_PER_POSE)
                .map(|j| {
                    Landmark::new(
                        0.35 + sway + j as f32 * 0.008,
                        0.15 + j as f32 * 0.02,
                        0.0,
                        0.92,
                    )
                })
                .collect();
            PoseSample::new(i * 33, landmarks)
        })
        .collect();

    let phase = |kind, start_frame, end_frame| MovementPhase {
        kind,
        start_frame,
        end_frame,
    };

    VideoAnalysis {
        asset_id: "demo".into(),
        filename: "demo.mp4".into(),
        duration_ms: 89_100,
        frame_rate: FrameRate::FPS_30,
        width: 1080,
        height: 1920,
        samples,
        phases: vec![
            phase(PhaseKind::Stance, 0, 90),
            phase(PhaseKind::LevelChange, 90, 120),
            phase(PhaseKind::Penetration, 120, 150),
            phase(PhaseKind::Takedown, 150, 240),
            phase(PhaseKind::Control, 240, 600),
        ],
    }
}
