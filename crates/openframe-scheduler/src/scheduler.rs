//! Fixed-rate frame scheduler on absolute deadlines.

use crate::clock::{Clock, MonotonicClock, duration_ns};
use crate::error::{SchedulerError, SchedulerResult};
use crate::jitter::JitterMetrics;
use crate::{FRAME_PERIOD_NS, MAX_FRAME_RATE_HZ};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of one [`FrameScheduler::wait_for_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Zero-based index of the frame that is starting.
    pub frame: u64,

    /// Whole periods dropped before this frame because the loop ran late.
    pub skipped: u64,

    /// How far past its scheduled start this frame began.
    pub jitter_ns: u64,
}

impl FrameTick {
    pub fn missed(&self) -> bool {
        self.skipped > 0
    }
}

/// Paces a loop to one frame per period.
///
/// Deadlines are absolute: frame `n + 1` is due exactly one period after
/// frame `n` was scheduled, not one period after it happened to wake, so
/// sleep overshoot does not accumulate into drift.
///
/// When the loop falls behind:
/// - late by less than one period, the frame runs immediately and the next
///   one keeps its original deadline (the late frame is shortened);
/// - late by one period or more, the whole periods are skipped and logged.
///   Skipped frames are never replayed in a burst.
///
/// The waiting is a clock sleep, never a busy-wait.
#[derive(Debug)]
pub struct FrameScheduler<C: Clock = MonotonicClock> {
    period_ns: u64,
    next_deadline_ns: Option<u64>,
    frame_count: u64,
    metrics: JitterMetrics,
    clock: C,
}

impl FrameScheduler<MonotonicClock> {
    /// Scheduler at the 60 Hz reference rate.
    pub fn new_60hz() -> Self {
        Self::with_period(FRAME_PERIOD_NS)
    }

    /// Scheduler with a custom period. A zero period is raised to 1 ns.
    pub fn with_period(period_ns: u64) -> Self {
        Self::with_clock(period_ns, MonotonicClock::new())
    }

    /// Scheduler running at `hz` frames per second.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidFrameRate`] unless `hz` is in
    /// `1..=MAX_FRAME_RATE_HZ`.
    pub fn from_hz(hz: u32) -> SchedulerResult<Self> {
        Ok(Self::with_period(period_for_hz(hz)?))
    }
}

impl Default for FrameScheduler<MonotonicClock> {
    fn default() -> Self {
        Self::new_60hz()
    }
}

/// Frame period for `hz`, rounded to the nearest nanosecond.
///
/// # Errors
///
/// Returns [`SchedulerError::InvalidFrameRate`] unless `hz` is in
/// `1..=MAX_FRAME_RATE_HZ`.
pub fn period_for_hz(hz: u32) -> SchedulerResult<u64> {
    if hz == 0 || hz > MAX_FRAME_RATE_HZ {
        return Err(SchedulerError::InvalidFrameRate {
            hz,
            max: MAX_FRAME_RATE_HZ,
        });
    }
    let hz = u64::from(hz);
    Ok(1_000_000_000u64.saturating_add(hz / 2) / hz)
}

impl<C: Clock> FrameScheduler<C> {
    /// Scheduler driven by an explicit clock.
    pub fn with_clock(period_ns: u64, clock: C) -> Self {
        Self {
            period_ns: period_ns.max(1),
            next_deadline_ns: None,
            frame_count: 0,
            metrics: JitterMetrics::new(),
            clock,
        }
    }

    /// Block until the next frame is due.
    ///
    /// The first call returns immediately and anchors the schedule.
    pub fn wait_for_frame(&mut self) -> FrameTick {
        let now = duration_ns(self.clock.now());
        let frame = self.frame_count;

        let (start, skipped, jitter_ns) = match self.next_deadline_ns {
            None => (now, 0, 0),
            Some(deadline) if now < deadline => {
                self.clock
                    .sleep(Duration::from_nanos(deadline.saturating_sub(now)));
                let woke = duration_ns(self.clock.now());
                (deadline, 0, woke.saturating_sub(deadline))
            }
            Some(deadline) => {
                let late = now.saturating_sub(deadline);
                let skipped = late / self.period_ns;
                let start = if skipped > 0 {
                    warn!(
                        frame,
                        skipped,
                        late_ns = late,
                        period_ns = self.period_ns,
                        "Frame loop fell behind, skipping missed frames"
                    );
                    deadline.saturating_add(skipped.saturating_mul(self.period_ns))
                } else {
                    deadline
                };
                (start, skipped, now.saturating_sub(start))
            }
        };

        self.next_deadline_ns = Some(start.saturating_add(self.period_ns));
        self.frame_count = self.frame_count.saturating_add(1);
        self.metrics.record_frame(jitter_ns, skipped);

        FrameTick {
            frame,
            skipped,
            jitter_ns,
        }
    }

    pub fn period_ns(&self) -> u64 {
        self.period_ns
    }

    /// Frames started so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames that started after losing at least one whole period.
    pub fn missed_frames(&self) -> u64 {
        self.metrics.missed_frames
    }

    /// Periods dropped in total.
    pub fn skipped_periods(&self) -> u64 {
        self.metrics.skipped_periods
    }

    pub fn metrics(&self) -> &JitterMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut JitterMetrics {
        &mut self.metrics
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Forget the schedule. The next wait returns immediately.
    pub fn reset(&mut self) {
        debug!(frames = self.frame_count, "Resetting frame scheduler");
        self.next_deadline_ns = None;
        self.frame_count = 0;
        self.metrics.reset();
    }
}
