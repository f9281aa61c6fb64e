//! The scan, update and send loop.

use crate::error::{ScanResult, TransportResult};
use crate::sink::ReportSink;
use crate::source::{InputScanSpeed, InputSource};
use crate::stats::BackendStats;
use openframe_mode::ControllerMode;
use openframe_scheduler::{Clock, FrameScheduler};
use openframe_state::{InputState, OutputState};
use tracing::{debug, error, info, trace, warn};

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Fresh report computed and sent.
    Sent,
    /// Scan failed; the previous report went out again unchanged.
    Resent,
    /// The transport refused the report.
    Dropped,
}

/// Ties input sources, one controller mode and one report sink together.
///
/// Each frame is strictly sequential: scan completes before the mode runs,
/// and the report is sent before the next scan starts. The retained
/// [`InputState`] is rebuilt from scratch every scan as the union of what
/// each source reported, so a source that stops reporting cannot leave
/// buttons stuck down.
pub struct CommunicationBackend<S: ReportSink> {
    sources: Vec<Box<dyn InputSource>>,
    /// Last committed reading of each source, parallel to `sources`.
    contributions: Vec<InputState>,
    pending: Vec<InputState>,
    mode: ControllerMode,
    sink: S,
    inputs: InputState,
    outputs: OutputState,
    stats: BackendStats,
    transport_failing: bool,
}

impl<S: ReportSink> CommunicationBackend<S> {
    pub fn new(mode: ControllerMode, sink: S) -> Self {
        Self {
            sources: Vec::new(),
            contributions: Vec::new(),
            pending: Vec::new(),
            mode,
            sink,
            inputs: InputState::new(),
            outputs: OutputState::neutral(),
            stats: BackendStats::new(),
            transport_failing: false,
        }
    }

    pub fn with_source(mut self, source: Box<dyn InputSource>) -> Self {
        self.add_source(source);
        self
    }

    pub fn add_source(&mut self, source: Box<dyn InputSource>) {
        debug!(
            source = source.name(),
            speed = %source.scan_speed(),
            best_effort = source.is_best_effort(),
            "Input source added"
        );
        self.sources.push(source);
        self.contributions.push(InputState::new());
    }

    /// Raw snapshot from the last successful scan.
    pub fn inputs(&self) -> &InputState {
        &self.inputs
    }

    /// Report produced by the last update.
    pub fn outputs(&self) -> &OutputState {
        &self.outputs
    }

    pub fn mode(&self) -> &ControllerMode {
        &self.mode
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn stats(&self) -> &BackendStats {
        &self.stats
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Scan every source.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`](crate::ScanError) from a source that
    /// is not best-effort. The retained inputs are left as they were.
    pub fn scan_inputs(&mut self) -> ScanResult<()> {
        self.scan(None)
    }

    /// Scan only the sources of one speed class. Skipped sources contribute
    /// only what they [`reaffirm`](InputSource::reaffirm).
    ///
    /// # Errors
    ///
    /// As [`scan_inputs`](Self::scan_inputs), for the visited sources.
    pub fn scan_inputs_filtered(&mut self, speed: InputScanSpeed) -> ScanResult<()> {
        self.scan(Some(speed))
    }

    fn scan(&mut self, filter: Option<InputScanSpeed>) -> ScanResult<()> {
        // Stage into a scratch copy so a failed scan commits nothing.
        self.pending.clear();
        self.pending.extend_from_slice(&self.contributions);

        let mut merged = InputState::new();
        for (source, previous) in self.sources.iter_mut().zip(self.pending.iter_mut()) {
            if filter.is_some_and(|speed| source.scan_speed() != speed) {
                let mut reaffirmed = InputState::new();
                source.reaffirm(&mut reaffirmed);
                merged = merged.union(reaffirmed);
                continue;
            }

            let mut fresh = InputState::new();
            match source.update_inputs(&mut fresh) {
                Ok(()) => {
                    *previous = fresh;
                    merged = merged.union(fresh);
                }
                Err(scan_error) if source.is_best_effort() => {
                    debug!(
                        source = source.name(),
                        error = %scan_error,
                        "Best-effort source failed, keeping its previous reading"
                    );
                    merged = merged.union(*previous);
                }
                Err(scan_error) => return Err(scan_error),
            }
        }

        std::mem::swap(&mut self.contributions, &mut self.pending);
        self.inputs = merged;
        Ok(())
    }

    /// Run the mode over the retained inputs and keep the result.
    pub fn update_outputs(&mut self) -> &OutputState {
        self.outputs = self.mode.update_outputs(&self.inputs);
        &self.outputs
    }

    /// Replace the active mode. The previous mode, with its SOCD memory, is
    /// dropped.
    pub fn set_game_mode(&mut self, mode: ControllerMode) {
        info!(
            previous = self.mode.name(),
            next = mode.name(),
            profile = %mode.profile().metadata.name,
            "Game mode replaced"
        );
        self.mode = mode;
    }

    /// Send the current report.
    ///
    /// The first failure in a run logs at `error!`; repeats log at `debug!`
    /// until a send succeeds again.
    ///
    /// # Errors
    ///
    /// Returns the sink's [`TransportError`](crate::TransportError).
    pub fn send_report(&mut self) -> TransportResult<()> {
        match self.sink.send_report(&self.outputs) {
            Ok(()) => {
                if self.transport_failing {
                    info!(frame = self.stats.frames, "Report transport recovered");
                    self.transport_failing = false;
                }
                Ok(())
            }
            Err(transport_error) => {
                self.stats.send_failures = self.stats.send_failures.saturating_add(1);
                if self.transport_failing {
                    debug!(frame = self.stats.frames, error = %transport_error, "Report transport still failing");
                } else {
                    error!(frame = self.stats.frames, error = %transport_error, "Report transport failed");
                    self.transport_failing = true;
                }
                Err(transport_error)
            }
        }
    }

    /// One complete frame: scan, update, send.
    ///
    /// A failed scan skips the update and re-sends the previous report, so a
    /// half-updated snapshot never reaches the mode.
    pub fn run_frame(&mut self) -> FrameOutcome {
        let frame = self.stats.frames;
        self.stats.frames = self.stats.frames.saturating_add(1);

        let resent = match self.scan_inputs() {
            Ok(()) => {
                let _outputs = self.update_outputs();
                false
            }
            Err(scan_error) => {
                self.stats.scan_failures = self.stats.scan_failures.saturating_add(1);
                self.stats.resent_frames = self.stats.resent_frames.saturating_add(1);
                warn!(
                    frame,
                    source = scan_error.source_name(),
                    error = %scan_error,
                    "Input scan failed, re-sending previous report"
                );
                true
            }
        };

        match self.send_report() {
            Err(_) => FrameOutcome::Dropped,
            Ok(()) if resent => FrameOutcome::Resent,
            Ok(()) => {
                self.stats.fresh_frames = self.stats.fresh_frames.saturating_add(1);
                trace!(frame, "Frame sent");
                FrameOutcome::Sent
            }
        }
    }

    /// Run `frames` frames paced by `scheduler`.
    pub fn run_for<C: Clock>(&mut self, scheduler: &mut FrameScheduler<C>, frames: u64) {
        for _ in 0..frames {
            let tick = scheduler.wait_for_frame();
            self.stats.skipped_frames = self.stats.skipped_frames.saturating_add(tick.skipped);
            let _outcome = self.run_frame();
        }
    }

    /// Run until `keep_going` returns false, paced by `scheduler`.
    ///
    /// `keep_going` sees each frame's outcome after it is sent.
    pub fn run_while<C: Clock>(
        &mut self,
        scheduler: &mut FrameScheduler<C>,
        mut keep_going: impl FnMut(FrameOutcome, &BackendStats) -> bool,
    ) {
        loop {
            let tick = scheduler.wait_for_frame();
            self.stats.skipped_frames = self.stats.skipped_frames.saturating_add(tick.skipped);
            let outcome = self.run_frame();
            if !keep_going(outcome, &self.stats) {
                break;
            }
        }
    }

    /// Give back the sink, dropping the sources and mode.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: ReportSink + std::fmt::Debug> std::fmt::Debug for CommunicationBackend<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommunicationBackend")
            .field("sources", &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("mode", &self.mode.name())
            .field("sink", &self.sink)
            .field("inputs", &self.inputs)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ScanError, TransportError};
    use crate::sink::RecordingSink;
    use crate::source::SnapshotSource;
    use openframe_state::LogicalButton;

    struct Failing;

    impl InputSource for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn scan_speed(&self) -> InputScanSpeed {
            InputScanSpeed::Slow
        }
        fn update_inputs(&mut self, _inputs: &mut InputState) -> ScanResult<()> {
            Err(ScanError::Disconnected {
                source_name: "failing".to_owned(),
            })
        }
    }

    struct Refusing;

    impl ReportSink for Refusing {
        fn send_report(&mut self, _report: &OutputState) -> TransportResult<()> {
            Err(TransportError::Disconnected)
        }
    }

    #[test]
    fn test_empty_backend_sends_neutral() {
        let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), RecordingSink::new());
        assert_eq!(backend.run_frame(), FrameOutcome::Sent);
        assert_eq!(backend.sink().last(), Some(&OutputState::neutral()));
    }

    #[test]
    fn test_snapshot_source_drives_report() {
        let source = SnapshotSource::new("matrix", InputScanSpeed::Fast);
        let handle = source.handle();
        let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), RecordingSink::new())
            .with_source(Box::new(source));

        handle.store(InputState::from_buttons(&[LogicalButton::A]));
        let _outcome = backend.run_frame();
        assert_eq!(backend.sink().last().map(|r| r.a), Some(true));
    }

    #[test]
    fn test_failed_scan_resends_previous() {
        let source = SnapshotSource::new("matrix", InputScanSpeed::Fast);
        let handle = source.handle();
        let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), RecordingSink::new())
            .with_source(Box::new(source));

        handle.store(InputState::from_buttons(&[LogicalButton::B]));
        let _first = backend.run_frame();

        backend.add_source(Box::new(Failing));
        handle.store(InputState::new());
        assert_eq!(backend.run_frame(), FrameOutcome::Resent);

        let reports = backend.sink().reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports.first(), reports.last());
        assert!(backend.inputs().is_pressed(LogicalButton::B));
        assert_eq!(backend.stats().scan_failures, 1);
        assert_eq!(backend.stats().resent_frames, 1);
    }

    #[test]
    fn test_transport_failure_counted() {
        let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), Refusing);
        assert_eq!(backend.run_frame(), FrameOutcome::Dropped);
        assert_eq!(backend.run_frame(), FrameOutcome::Dropped);
        assert_eq!(backend.stats().send_failures, 2);
        assert_eq!(backend.stats().frames, 2);
        assert_eq!(backend.stats().fresh_frames, 0);
    }

    /// Accepts the first `accept` reports, then refuses everything.
    struct AcceptThenRefuse {
        accept: u32,
    }

    impl ReportSink for AcceptThenRefuse {
        fn send_report(&mut self, _report: &OutputState) -> TransportResult<()> {
            if self.accept == 0 {
                return Err(TransportError::Disconnected);
            }
            self.accept -= 1;
            Ok(())
        }
    }

    #[test]
    fn test_refused_resend_counts_once_against_fresh_frames() {
        let mut backend =
            CommunicationBackend::new(ControllerMode::builtin_default(), AcceptThenRefuse { accept: 1 });
        assert_eq!(backend.run_frame(), FrameOutcome::Sent);

        backend.add_source(Box::new(Failing));
        assert_eq!(backend.run_frame(), FrameOutcome::Dropped);
        assert_eq!(backend.run_frame(), FrameOutcome::Dropped);

        let stats = backend.stats();
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.resent_frames, 2);
        assert_eq!(stats.send_failures, 2);
        assert_eq!(stats.fresh_frames, 1);
    }
}
