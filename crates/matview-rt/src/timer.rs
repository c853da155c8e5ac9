//! Explicit timer queue.
//!
//! Replaces animation-frame and wall-clock timers with a polled queue: the
//! owner schedules events with a delay, then drains whatever has come due on
//! each turn of the host loop. Events are plain data, so nothing here can
//! hold a stale closure after teardown — `clear` cancels everything at once.

use smallvec::SmallVec;
use std::time::Duration;

/// Handle for a scheduled timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct TimerSlot<E> {
    handle: TimerHandle,
    deadline: Duration,
    event: E,
}

/// A queue of delayed events driven by caller-supplied time.
pub struct TimerQueue<E> {
    timers: Vec<TimerSlot<E>>,
    next_id: u64,
}

impl<E> TimerQueue<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `event` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(TimerSlot {
            handle,
            deadline: now + delay,
            event,
        });
        handle
    }

    /// Cancel a scheduled timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|slot| slot.handle != handle);
        self.timers.len() != before
    }

    /// Remove and return every event whose deadline has passed, ordered by
    /// deadline (scheduling order breaks ties).
    pub fn poll(&mut self, now: Duration) -> SmallVec<[E; 4]> {
        let mut due: Vec<TimerSlot<E>> = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].deadline <= now {
                due.push(self.timers.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|slot| (slot.deadline, slot.handle.0));
        due.into_iter().map(|slot| slot.event).collect()
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|slot| slot.deadline).min()
    }

    /// Cancel all pending timers.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
