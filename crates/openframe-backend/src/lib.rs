//! Fixed-rate communication backend for OpenFrame.
//!
//! The backend owns the per-frame cycle:
//!
//! 1. **Scan**: every [`InputSource`] writes a fresh raw reading; the union
//!    becomes the frame's snapshot. A failing source fails the scan unless it
//!    is best-effort.
//! 2. **Update**: the active [`ControllerMode`](openframe_mode::ControllerMode)
//!    turns the snapshot into an [`OutputState`](openframe_state::OutputState).
//! 3. **Send**: the [`ReportSink`] encodes and transmits the report.
//!
//! Frames are paced by an [`openframe_scheduler::FrameScheduler`]. Scan and
//! transport failures are recovered inside the frame and counted in
//! [`BackendStats`]; they never propagate past it.
//!
//! # Example
//!
//! ```
//! use openframe_backend::{CommunicationBackend, InputScanSpeed, RecordingSink, SnapshotSource};
//! use openframe_mode::ControllerMode;
//! use openframe_state::{InputState, LogicalButton};
//!
//! let source = SnapshotSource::new("matrix", InputScanSpeed::Fast);
//! let matrix = source.handle();
//! let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), RecordingSink::new())
//!     .with_source(Box::new(source));
//!
//! matrix.store(InputState::from_buttons(&[LogicalButton::Left]));
//! backend.run_frame();
//! assert_eq!(backend.outputs().left_stick_x, 28);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod error;
pub mod mailbox;
pub mod prelude;
pub mod sink;
pub mod source;
pub mod stats;

pub use backend::{CommunicationBackend, FrameOutcome};
pub use error::{ScanError, ScanResult, TransportError, TransportResult};
pub use mailbox::{MailboxSink, ReportMailbox};
pub use sink::{RecordingSink, ReportSink};
pub use source::{InputScanSpeed, InputSource, SnapshotHandle, SnapshotSource};
pub use stats::BackendStats;
