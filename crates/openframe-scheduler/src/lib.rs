//! Fixed-rate frame scheduling for the OpenFrame input loop.
//!
//! Reports go to the host at a fixed cadence, 60 Hz by default. This crate
//! paces the scan/update/send cycle to that cadence:
//!
//! - **FrameScheduler**: absolute frame deadlines on a monotonic clock. Sleeps
//!   out the remainder of each frame and never busy-waits. A late frame is
//!   shortened; whole periods that were missed are skipped and logged, never
//!   replayed.
//! - **JitterMetrics**: wake-up jitter with a bounded sample window for
//!   percentiles, plus the missed-frame rate.
//! - **Clock**: the time source seam. [`MonotonicClock`] for real loops,
//!   [`ManualClock`] for deterministic tests.
//!
//! # Example
//!
//! ```no_run
//! use openframe_scheduler::FrameScheduler;
//!
//! let mut scheduler = FrameScheduler::new_60hz();
//! loop {
//!     let tick = scheduler.wait_for_frame();
//!     // scan, update, send
//!     # if tick.frame > 3 { break; }
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod error;
pub mod jitter;
pub mod prelude;
pub mod scheduler;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{SchedulerError, SchedulerResult};
pub use jitter::JitterMetrics;
pub use scheduler::{FrameScheduler, FrameTick, period_for_hz};

/// Reference frame rate of the report loop.
pub const DEFAULT_FRAME_RATE_HZ: u32 = 60;

/// Frame period at 60 Hz in nanoseconds (1/60 s, rounded).
pub const FRAME_PERIOD_NS: u64 = 16_666_667;

/// Highest frame rate accepted by [`FrameScheduler::from_hz`].
pub const MAX_FRAME_RATE_HZ: u32 = 1_000;
