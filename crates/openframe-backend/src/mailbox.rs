//! Single-writer/single-reader report exchange.
//!
//! The frame loop publishes each report here and a transport serviced from
//! another context (an interrupt handler, a USB completion thread) picks up
//! the latest one.
//!
//! The report is packed into two 64-bit words held in lock-free
//! [`crossbeam::atomic::AtomicCell`]s and guarded by a sequence counter that
//! is odd while a publish is in progress. Readers never wait: a read that
//! overlaps a publish returns `None` and the transport keeps the report it
//! already has.

use crate::error::TransportResult;
use crate::sink::ReportSink;
use crossbeam::atomic::AtomicCell;
use openframe_state::OutputState;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering, fence};

#[derive(Debug)]
pub struct ReportMailbox {
    /// Twice the number of completed publishes, plus one while writing.
    sequence: AtomicU64,
    digital: AtomicCell<u64>,
    analog: AtomicCell<u64>,
}

impl Default for ReportMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportMailbox {
    /// Empty mailbox holding a neutral report at sequence 0.
    pub fn new() -> Self {
        let (digital, analog) = pack(&OutputState::neutral());
        Self {
            sequence: AtomicU64::new(0),
            digital: AtomicCell::new(digital),
            analog: AtomicCell::new(analog),
        }
    }

    /// True when every word of the exchange is a native atomic.
    pub fn is_lock_free() -> bool {
        AtomicCell::<u64>::is_lock_free()
    }

    /// Replace the held report and return its sequence number.
    ///
    /// Must only be called from the single writer.
    pub fn publish(&self, report: OutputState) -> u64 {
        let (digital, analog) = pack(&report);
        let start = self.sequence.load(Ordering::Relaxed);
        self.sequence.store(start.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);
        self.digital.store(digital);
        self.analog.store(analog);
        let end = start.wrapping_add(2);
        self.sequence.store(end, Ordering::Release);
        end / 2
    }

    /// Sequence number of the most recent completed publish.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Acquire) / 2
    }

    /// The held report and the sequence it was published at.
    ///
    /// Returns `None` when the read raced a publish.
    pub fn latest(&self) -> Option<(u64, OutputState)> {
        let start = self.sequence.load(Ordering::Acquire);
        if start % 2 == 1 {
            return None;
        }
        let digital = self.digital.load();
        let analog = self.analog.load();
        fence(Ordering::Acquire);
        let end = self.sequence.load(Ordering::Relaxed);
        (start == end).then(|| (start / 2, unpack(digital, analog)))
    }

    /// The held report if it was published after `seen`.
    pub fn take_newer(&self, seen: u64) -> Option<(u64, OutputState)> {
        self.latest().filter(|(sequence, _)| *sequence > seen)
    }
}

fn digital_fields(report: &OutputState) -> [bool; 17] {
    [
        report.a,
        report.b,
        report.x,
        report.y,
        report.start,
        report.select,
        report.home,
        report.button_l,
        report.button_r,
        report.trigger_l_digital,
        report.trigger_r_digital,
        report.dpad_up,
        report.dpad_down,
        report.dpad_left,
        report.dpad_right,
        report.left_stick_click,
        report.right_stick_click,
    ]
}

fn pack(report: &OutputState) -> (u64, u64) {
    let digital = digital_fields(report)
        .iter()
        .enumerate()
        .filter(|(_, pressed)| **pressed)
        .fold(0u64, |bits, (bit, _)| bits | (1u64 << bit));
    let analog = u64::from_le_bytes([
        report.left_stick_x,
        report.left_stick_y,
        report.right_stick_x,
        report.right_stick_y,
        report.trigger_l_analog,
        report.trigger_r_analog,
        0,
        0,
    ]);
    (digital, analog)
}

fn unpack(digital: u64, analog: u64) -> OutputState {
    let bit = |index: u32| digital & (1u64 << index) != 0;
    let [lx, ly, rx, ry, tl, tr, _, _] = analog.to_le_bytes();
    OutputState {
        a: bit(0),
        b: bit(1),
        x: bit(2),
        y: bit(3),
        start: bit(4),
        select: bit(5),
        home: bit(6),
        button_l: bit(7),
        button_r: bit(8),
        trigger_l_digital: bit(9),
        trigger_r_digital: bit(10),
        dpad_up: bit(11),
        dpad_down: bit(12),
        dpad_left: bit(13),
        dpad_right: bit(14),
        left_stick_click: bit(15),
        right_stick_click: bit(16),
        left_stick_x: lx,
        left_stick_y: ly,
        right_stick_x: rx,
        right_stick_y: ry,
        trigger_l_analog: tl,
        trigger_r_analog: tr,
    }
}

/// [`ReportSink`] that publishes into a shared [`ReportMailbox`].
#[derive(Debug, Clone, Default)]
pub struct MailboxSink {
    mailbox: Arc<ReportMailbox>,
}

impl MailboxSink {
    pub fn new(mailbox: Arc<ReportMailbox>) -> Self {
        Self { mailbox }
    }

    pub fn mailbox(&self) -> &Arc<ReportMailbox> {
        &self.mailbox
    }
}

impl ReportSink for MailboxSink {
    fn send_report(&mut self, report: &OutputState) -> TransportResult<()> {
        let _sequence = self.mailbox.publish(*report);
        Ok(())
    }
}
