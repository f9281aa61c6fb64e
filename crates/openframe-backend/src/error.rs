//! Per-frame error types.
//!
//! Neither error escapes a frame: the backend recovers from both and counts
//! them in [`BackendStats`](crate::BackendStats).

use thiserror::Error;

/// An input source could not deliver a reading this frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Input source {source_name} disconnected")]
    Disconnected { source_name: String },

    #[error("Input source {source_name} timed out")]
    TimedOut { source_name: String },

    #[error("Input source {source_name} reported a hardware fault: {detail}")]
    HardwareFault { source_name: String, detail: String },
}

impl ScanError {
    pub fn source_name(&self) -> &str {
        match self {
            Self::Disconnected { source_name }
            | Self::TimedOut { source_name }
            | Self::HardwareFault { source_name, .. } => source_name,
        }
    }
}

/// The encoder or transport refused a report.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Report rejected by transport: {0}")]
    Rejected(String),

    #[error("Transport disconnected")]
    Disconnected,

    #[error("Report encoding failed: {0}")]
    Encode(String),

    #[error("Transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScanResult<T> = Result<T, ScanError>;
pub type TransportResult<T> = Result<T, TransportError>;
