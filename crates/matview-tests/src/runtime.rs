//! Integration tests for the timing runtime.
//!
//! Drives the rt primitives together against a manual clock, the way the
//! sync controller composes them.

use matview_rt::{Clock, Debounce, ManualClock, Throttle, TimerQueue, TtlCache};
use std::time::Duration;

const MS: Duration = Duration::from_millis(1);

#[test]
fn throttle_and_clock_compose() {
    let clock = ManualClock::new();
    let mut gate = Throttle::new(50 * MS);
    let mut released = Vec::new();

    for i in 0..10 {
        if let Some(v) = gate.offer(clock.now(), i) {
            released.push(v);
        }
        clock.advance(10 * MS);
    }
    if let Some(v) = gate.poll(clock.now()) {
        released.push(v);
    }

    // Offers land at 0..90ms: immediate releases at 0 and 50, the trailing
    // value 9 releases on the final poll at 100ms.
    assert_eq!(released, vec![0, 5, 9]);
}

#[test]
fn debounced_command_survives_only_after_quiet() {
    let clock = ManualClock::new();
    let mut gate = Debounce::new(100 * MS);

    for target in [1_000u64, 2_000, 3_000] {
        gate.offer(clock.now(), Duration::from_millis(target));
        clock.advance(40 * MS);
        assert_eq!(gate.poll(clock.now()), None);
    }

    clock.advance(60 * MS);
    assert_eq!(gate.poll(clock.now()), Some(Duration::from_secs(3)));
}

#[test]
fn cache_sweep_driven_by_timer_queue() {
    let clock = ManualClock::new();
    let mut cache: TtlCache<&str, u32> = TtlCache::new(16);
    let mut timers: TimerQueue<&str> = TimerQueue::new();

    cache.insert("short", 1, 5 * MS, clock.now());
    cache.insert("long", 2, Duration::from_secs(60), clock.now());
    timers.schedule(clock.now(), 10 * MS, "sweep");

    clock.advance(12 * MS);
    let mut swept = 0;
    for event in timers.poll(clock.now()) {
        assert_eq!(event, "sweep");
        swept = cache.sweep(clock.now());
        timers.schedule(clock.now(), 10 * MS, "sweep");
    }

    assert_eq!(swept, 1);
    assert_eq!(cache.get(&"long", clock.now()), Some(2));
    assert_eq!(timers.len(), 1);
}

#[test]
fn teardown_pattern_leaves_no_timers() {
    let clock = ManualClock::new();
    let mut gate: Throttle<u32> = Throttle::new(16 * MS);
    let mut seek: Debounce<u32> = Debounce::new(100 * MS);
    let mut timers: TimerQueue<&str> = TimerQueue::new();

    gate.offer(clock.now(), 1);
    gate.offer(clock.now(), 2);
    seek.offer(clock.now(), 3);
    timers.schedule(clock.now(), 10 * MS, "sweep");

    // Detach: cancel everything, then advance arbitrarily far.
    gate.cancel();
    seek.cancel();
    timers.clear();
    clock.advance(Duration::from_secs(3600));

    assert_eq!(gate.poll(clock.now()), None);
    assert_eq!(seek.poll(clock.now()), None);
    assert!(timers.poll(clock.now()).is_empty());
}
