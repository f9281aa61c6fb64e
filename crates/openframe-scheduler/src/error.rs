//! Error types for the scheduler crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid frame rate {hz} Hz: expected 1..={max}")]
    InvalidFrameRate { hz: u32, max: u32 },
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
