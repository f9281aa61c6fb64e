//! Frame loop behavior across sources, modes and transports.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use openframe_backend::prelude::*;
use openframe_mode::{ControllerMode, ModeKind};
use openframe_profile::Profile;
use openframe_scheduler::{Clock, FrameScheduler, ManualClock};
use openframe_socd::SocdPolicy;
use openframe_state::{InputState, LogicalButton::*, OutputState};
use tracing_test::traced_test;

/// Source replaying a fixed list of readings; `None` is a failed scan.
struct Scripted {
    name: &'static str,
    speed: InputScanSpeed,
    best_effort: bool,
    reaffirms: bool,
    readings: VecDeque<Option<InputState>>,
    last: InputState,
}

impl Scripted {
    fn new(name: &'static str, speed: InputScanSpeed, readings: Vec<Option<InputState>>) -> Self {
        Self {
            name,
            speed,
            best_effort: false,
            reaffirms: false,
            readings: readings.into(),
            last: InputState::new(),
        }
    }

    fn best_effort(mut self) -> Self {
        self.best_effort = true;
        self
    }

    fn reaffirming(mut self) -> Self {
        self.reaffirms = true;
        self
    }
}

impl InputSource for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    fn scan_speed(&self) -> InputScanSpeed {
        self.speed
    }

    fn update_inputs(&mut self, inputs: &mut InputState) -> ScanResult<()> {
        match self.readings.pop_front().flatten() {
            Some(reading) => {
                self.last = reading;
                *inputs = inputs.union(reading);
                Ok(())
            }
            None => Err(ScanError::TimedOut {
                source_name: self.name.to_owned(),
            }),
        }
    }

    fn is_best_effort(&self) -> bool {
        self.best_effort
    }

    fn reaffirm(&self, inputs: &mut InputState) {
        if self.reaffirms {
            *inputs = inputs.union(self.last);
        }
    }
}

fn held(buttons: &[openframe_state::LogicalButton]) -> Option<InputState> {
    Some(InputState::from_buttons(buttons))
}

fn backend() -> CommunicationBackend<RecordingSink> {
    CommunicationBackend::new(ControllerMode::builtin_default(), RecordingSink::new())
}

#[test]
fn test_scan_unions_all_sources() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = backend()
        .with_source(Box::new(Scripted::new("left", InputScanSpeed::Fast, vec![held(&[Left])])))
        .with_source(Box::new(Scripted::new("face", InputScanSpeed::Slow, vec![held(&[A, B])])));

    backend.scan_inputs()?;
    assert_eq!(*backend.inputs(), InputState::from_buttons(&[Left, A, B]));
    Ok(())
}

#[test]
fn test_filtered_scan_drops_skipped_source_fields() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = backend()
        .with_source(Box::new(Scripted::new(
            "matrix",
            InputScanSpeed::Fast,
            vec![held(&[Left]), held(&[Left])],
        )))
        .with_source(Box::new(Scripted::new("aux", InputScanSpeed::Slow, vec![held(&[Start])])));

    backend.scan_inputs()?;
    assert!(backend.inputs().is_pressed(Start));

    backend.scan_inputs_filtered(InputScanSpeed::Fast)?;
    assert!(backend.inputs().is_pressed(Left));
    assert!(!backend.inputs().is_pressed(Start));
    Ok(())
}

#[test]
fn test_filtered_scan_keeps_reaffirmed_fields() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = backend()
        .with_source(Box::new(Scripted::new(
            "matrix",
            InputScanSpeed::Fast,
            vec![held(&[]), held(&[Up])],
        )))
        .with_source(Box::new(
            Scripted::new("aux", InputScanSpeed::Slow, vec![held(&[Start])]).reaffirming(),
        ));

    backend.scan_inputs()?;
    backend.scan_inputs_filtered(InputScanSpeed::Fast)?;
    assert_eq!(*backend.inputs(), InputState::from_buttons(&[Up, Start]));
    Ok(())
}

#[test]
fn test_failed_scan_commits_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = backend()
        .with_source(Box::new(Scripted::new(
            "matrix",
            InputScanSpeed::Fast,
            vec![held(&[A]), held(&[B])],
        )))
        .with_source(Box::new(Scripted::new("aux", InputScanSpeed::Fast, vec![held(&[]), None])));

    backend.scan_inputs()?;
    let failed = backend.scan_inputs();
    assert!(matches!(failed, Err(ScanError::TimedOut { ref source_name }) if source_name == "aux"));
    // The matrix read B before aux failed; none of it is kept.
    assert_eq!(*backend.inputs(), InputState::from_buttons(&[A]));
    Ok(())
}

#[test]
fn test_best_effort_source_keeps_previous_reading() -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = backend()
        .with_source(Box::new(Scripted::new(
            "matrix",
            InputScanSpeed::Fast,
            vec![held(&[A]), held(&[B])],
        )))
        .with_source(Box::new(
            Scripted::new("aux", InputScanSpeed::Fast, vec![held(&[Start]), None]).best_effort(),
        ));

    backend.scan_inputs()?;
    backend.scan_inputs()?;
    assert_eq!(*backend.inputs(), InputState::from_buttons(&[B, Start]));
    Ok(())
}

#[test]
#[traced_test]
fn test_failed_frame_resends_and_warns() {
    let mut backend = backend().with_source(Box::new(Scripted::new(
        "matrix",
        InputScanSpeed::Fast,
        vec![held(&[Right]), None, held(&[])],
    )));

    assert_eq!(backend.run_frame(), FrameOutcome::Sent);
    assert_eq!(backend.run_frame(), FrameOutcome::Resent);
    assert_eq!(backend.run_frame(), FrameOutcome::Sent);

    let reports = backend.sink().reports();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports.first(), reports.get(1));
    assert_eq!(reports.last(), Some(&OutputState::neutral()));
    assert!(logs_contain("Input scan failed, re-sending previous report"));
    assert!(logs_contain("source=\"matrix\"") || logs_contain("source=matrix"));
}

struct FlakyTransport {
    failures_left: u32,
    delivered: u32,
}

impl ReportSink for FlakyTransport {
    fn send_report(&mut self, _report: &OutputState) -> TransportResult<()> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(TransportError::Rejected("endpoint stalled".to_owned()));
        }
        self.delivered += 1;
        Ok(())
    }
}

#[test]
#[traced_test]
fn test_transport_failure_logs_error_once() {
    let sink = FlakyTransport {
        failures_left: 3,
        delivered: 0,
    };
    let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), sink);

    for _ in 0..5 {
        let _outcome = backend.run_frame();
    }

    assert_eq!(backend.stats().send_failures, 3);
    assert_eq!(backend.sink().delivered, 2);
    logs_assert(|lines: &[&str]| {
        let errors = lines
            .iter()
            .filter(|line| line.contains("Report transport failed"))
            .count();
        let repeats = lines
            .iter()
            .filter(|line| line.contains("Report transport still failing"))
            .count();
        match (errors, repeats) {
            (1, 2) => Ok(()),
            other => Err(format!("unexpected transport log counts {other:?}")),
        }
    });
    assert!(logs_contain("Report transport recovered"));
}

#[test]
#[traced_test]
fn test_set_game_mode_replaces_logic() {
    let source = SnapshotSource::new("matrix", InputScanSpeed::Fast);
    let matrix = source.handle();
    let mut backend = backend().with_source(Box::new(source));

    matrix.store(InputState::from_buttons(&[A]));
    let _first = backend.run_frame();
    assert!(backend.outputs().a);

    backend.set_game_mode(ControllerMode::new(
        ModeKind::ProfileOnly,
        SocdPolicy::SecondInputPriority,
        Profile::builtin(),
    ));
    let _second = backend.run_frame();
    assert!(!backend.outputs().a);
    assert_eq!(backend.mode().kind(), ModeKind::ProfileOnly);
    assert!(logs_contain("Game mode replaced"));
}

#[test]
fn test_run_for_paces_and_counts_skips() {
    let clock = ManualClock::new();
    let mut scheduler = FrameScheduler::with_clock(1_000_000, clock.clone());
    let mut backend = backend();

    backend.run_for(&mut scheduler, 3);
    clock.advance(Duration::from_millis(4));
    backend.run_for(&mut scheduler, 2);

    assert_eq!(backend.stats().frames, 5);
    assert_eq!(backend.stats().skipped_frames, 3);
    assert_eq!(backend.sink().reports().len(), 5);
}

#[test]
fn test_run_while_stops_on_request() {
    let clock = ManualClock::new();
    let mut scheduler = FrameScheduler::with_clock(1_000_000, clock.clone());
    let mut backend = backend();

    backend.run_while(&mut scheduler, |_outcome, stats| stats.frames < 4);
    assert_eq!(backend.stats().frames, 4);
    assert_eq!(clock.now(), Duration::from_millis(3));
}

#[test]
fn test_mailbox_sink_exposes_latest_report() -> Result<(), Box<dyn std::error::Error>> {
    let mailbox = Arc::new(ReportMailbox::new());
    let source = SnapshotSource::new("matrix", InputScanSpeed::Fast);
    let matrix = source.handle();
    let mut backend = CommunicationBackend::new(
        ControllerMode::builtin_default(),
        MailboxSink::new(Arc::clone(&mailbox)),
    )
    .with_source(Box::new(source));

    matrix.store(InputState::from_buttons(&[Down]));
    let _outcome = backend.run_frame();

    let (sequence, report) = mailbox.latest().ok_or("report not readable")?;
    assert_eq!(sequence, 1);
    assert_eq!(report.left_stick_y, 28);
    Ok(())
}

#[test]
fn test_error_messages() {
    insta::assert_snapshot!(
        ScanError::TimedOut { source_name: "aux".to_owned() }.to_string(),
        @"Input source aux timed out"
    );
    insta::assert_snapshot!(
        ScanError::HardwareFault {
            source_name: "matrix".to_owned(),
            detail: "row 3 stuck".to_owned(),
        }
        .to_string(),
        @"Input source matrix reported a hardware fault: row 3 stuck"
    );
    insta::assert_snapshot!(
        TransportError::Rejected("endpoint stalled".to_owned()).to_string(),
        @"Report rejected by transport: endpoint stalled"
    );
}
