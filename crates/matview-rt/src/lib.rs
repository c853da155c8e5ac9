//! MatView RT - Deterministic timing runtime
//!
//! Everything in this crate is driven by caller-supplied `now` values rather
//! than wall-clock timers, so the whole runtime can be exercised against a
//! manual clock in tests:
//! - Injectable clocks (monotonic and manual)
//! - Timer queue (explicit scheduler with cancellable handles)
//! - Throttle/debounce rate-limiting gates
//! - Bounded memoizing cache with TTL expiry
//! - Frame-rate monitor with performance grades

pub mod cache;
pub mod clock;
pub mod limiter;
pub mod monitor;
pub mod timer;

pub use cache::{CacheStats, TtlCache, SWEEP_INTERVAL};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use limiter::{Debounce, Throttle};
pub use monitor::{FrameRateMonitor, PerformanceGrade, PerformanceMetrics};
pub use timer::{TimerHandle, TimerQueue};
