//! Common scheduler types.

pub use crate::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::error::{SchedulerError, SchedulerResult};
pub use crate::jitter::JitterMetrics;
pub use crate::scheduler::{FrameScheduler, FrameTick, period_for_hz};
pub use crate::{DEFAULT_FRAME_RATE_HZ, FRAME_PERIOD_NS, MAX_FRAME_RATE_HZ};
