//! Time sources.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source used by [`FrameScheduler`](crate::FrameScheduler).
pub trait Clock {
    /// Time elapsed since the clock's origin. Never goes backwards.
    fn now(&self) -> Duration;

    /// Suspend the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Wall-clock-independent time from [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Default)]
struct ManualState {
    now_ns: AtomicU64,
    slept_ns: AtomicU64,
    sleeps: AtomicU64,
}

/// Simulated clock. Time only moves through [`advance`](Self::advance) and
/// through `sleep`, which advances it by exactly the requested amount.
///
/// Clones share the same time, so a test can keep one handle while the
/// scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Arc<ManualState>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, as if work took `duration`.
    pub fn advance(&self, duration: Duration) {
        self.state
            .now_ns
            .fetch_add(duration_ns(duration), Ordering::AcqRel);
    }

    /// Total time spent in `sleep`.
    pub fn slept(&self) -> Duration {
        Duration::from_nanos(self.state.slept_ns.load(Ordering::Acquire))
    }

    /// Number of `sleep` calls.
    pub fn sleep_calls(&self) -> u64 {
        self.state.sleeps.load(Ordering::Acquire)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.state.now_ns.load(Ordering::Acquire))
    }

    fn sleep(&self, duration: Duration) {
        let ns = duration_ns(duration);
        self.state.now_ns.fetch_add(ns, Ordering::AcqRel);
        self.state.slept_ns.fetch_add(ns, Ordering::AcqRel);
        self.state.sleeps.fetch_add(1, Ordering::AcqRel);
    }
}

pub(crate) fn duration_ns(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
