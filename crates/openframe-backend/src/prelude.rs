//! Common backend types.

pub use crate::backend::{CommunicationBackend, FrameOutcome};
pub use crate::error::{ScanError, ScanResult, TransportError, TransportResult};
pub use crate::mailbox::{MailboxSink, ReportMailbox};
pub use crate::sink::{RecordingSink, ReportSink};
pub use crate::source::{InputScanSpeed, InputSource, SnapshotHandle, SnapshotSource};
pub use crate::stats::BackendStats;
