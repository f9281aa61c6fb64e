//! Report transmission.

use crate::error::TransportResult;
use openframe_state::OutputState;

/// Encodes an [`OutputState`] into a wire format and transmits it.
///
/// Called exactly once per frame. Must not block on transfer completion:
/// sending is fire-and-forget from the loop's point of view.
pub trait ReportSink {
    /// # Errors
    ///
    /// Returns a [`TransportError`](crate::TransportError) if the report
    /// could not be handed to the transport.
    fn send_report(&mut self, report: &OutputState) -> TransportResult<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn send_report(&mut self, report: &OutputState) -> TransportResult<()> {
        (**self).send_report(report)
    }
}

/// Sink that keeps every report, for host-side tools and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    reports: Vec<OutputState>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[OutputState] {
        &self.reports
    }

    pub fn last(&self) -> Option<&OutputState> {
        self.reports.last()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl ReportSink for RecordingSink {
    fn send_report(&mut self, report: &OutputState) -> TransportResult<()> {
        self.reports.push(*report);
        Ok(())
    }
}
