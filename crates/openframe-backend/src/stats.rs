//! Backend frame statistics.

/// Counters for the scan/update/send loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendStats {
    /// Frames run, including re-sent ones.
    pub frames: u64,
    /// Frames that delivered a report built from a fresh scan.
    pub fresh_frames: u64,
    /// Scans that failed as a whole.
    pub scan_failures: u64,
    /// Frames that re-sent the previous report after a failed scan.
    pub resent_frames: u64,
    /// Reports the transport refused.
    pub send_failures: u64,
    /// Frame periods skipped because the loop ran late.
    pub skipped_frames: u64,
}

impl BackendStats {
    pub const fn new() -> Self {
        Self {
            frames: 0,
            fresh_frames: 0,
            scan_failures: 0,
            resent_frames: 0,
            send_failures: 0,
            skipped_frames: 0,
        }
    }
}
