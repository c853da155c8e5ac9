//! Throttle and debounce gates.
//!
//! Both gates carry their timing state explicitly — last fire time, pending
//! deadline, pending value — instead of closing over timers. They hold data
//! rather than callbacks, so a failure in downstream processing can never
//! wedge a gate: the caller takes the released value, and whatever happens
//! to it, the gate is already back in a clean state.
//!
//! Both are last-call-wins: when calls coalesce, only the most recent value
//! survives to the deferred fire.

use std::time::Duration;

/// Rate limiter guaranteeing at most one release per `interval`, never
/// dropping the final call of a burst.
///
/// `offer` releases immediately when the interval has elapsed since the last
/// release; otherwise the value is parked and [`poll`](Self::poll) releases
/// it once the remainder of the interval has passed.
#[derive(Debug)]
pub struct Throttle<T> {
    interval: Duration,
    last_fired: Option<Duration>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// Create a throttle with the given minimum release interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            pending: None,
        }
    }

    /// Submit a value at time `now`.
    ///
    /// Returns the value to dispatch immediately, or `None` when it was
    /// coalesced into the pending slot (replacing any earlier pending value).
    pub fn offer(&mut self, now: Duration, value: T) -> Option<T> {
        match self.last_fired {
            Some(last) if now.saturating_sub(last) < self.interval => {
                self.pending = Some(value);
                None
            }
            _ => {
                // A parked value coalesces into this newer call.
                self.pending = None;
                self.last_fired = Some(now);
                Some(value)
            }
        }
    }

    /// Release the pending value if its deferred fire time has arrived.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let deadline = self.deadline()?;
        if now >= deadline {
            self.last_fired = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// When the pending value becomes due, if one is parked.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref()?;
        Some(self.last_fired.unwrap_or(Duration::ZERO) + self.interval)
    }

    /// Drop all state; the next `offer` releases immediately.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_fired = None;
    }

    /// True when a value is parked awaiting its deferred fire.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Rate limiter that releases a single value only after the input has been
/// quiet for `delay`.
///
/// Every `offer` replaces the pending value and pushes the deadline out;
/// [`poll`](Self::poll) releases once no further offers arrive for `delay`.
#[derive(Debug)]
pub struct Debounce<T> {
    delay: Duration,
    deadline: Option<Duration>,
    pending: Option<T>,
}

impl<T> Debounce<T> {
    /// Create a debounce with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            pending: None,
        }
    }

    /// Submit a value at time `now`, resetting the quiet period.
    pub fn offer(&mut self, now: Duration, value: T) {
        self.pending = Some(value);
        self.deadline = Some(now + self.delay);
    }

    /// Release the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// When the pending value will fire, if one is parked.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// The parked value, if any, without releasing it.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Drop the pending value and deadline.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// True when a value is parked awaiting the quiet period.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
