//! Property-based tests for the scan merge.

use openframe_backend::{CommunicationBackend, InputScanSpeed, RecordingSink, SnapshotSource};
use openframe_mode::ControllerMode;
use openframe_state::InputState;
use proptest::prelude::*;

/// Raw snapshots restricted to the low 20 bits.
fn snapshot() -> impl Strategy<Value = InputState> {
    (0u32..(1 << 20)).prop_map(InputState::from_bits)
}

fn speed() -> impl Strategy<Value = Option<InputScanSpeed>> {
    prop_oneof![
        Just(None),
        Just(Some(InputScanSpeed::Fast)),
        Just(Some(InputScanSpeed::Slow)),
    ]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    /// After any scan, the snapshot is exactly the union of what each source
    /// reported or reaffirmed in that scan. Nothing from earlier frames leaks.
    #[test]
    fn scan_is_union_of_current_readings(
        frames in prop::collection::vec((snapshot(), snapshot(), speed()), 1..32),
    ) {
        let fast = SnapshotSource::new("fast", InputScanSpeed::Fast);
        let slow = SnapshotSource::new("slow", InputScanSpeed::Slow);
        let (fast_handle, slow_handle) = (fast.handle(), slow.handle());

        let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), RecordingSink::new())
            .with_source(Box::new(fast))
            .with_source(Box::new(slow));

        for (fast_reading, slow_reading, filter) in frames {
            fast_handle.store(fast_reading);
            slow_handle.store(slow_reading);

            let scanned = match filter {
                Some(speed) => backend.scan_inputs_filtered(speed),
                None => backend.scan_inputs(),
            };
            prop_assert!(scanned.is_ok());
            // Snapshot sources reaffirm when skipped, so both always count.
            prop_assert_eq!(*backend.inputs(), fast_reading.union(slow_reading));
        }
    }

    /// Two consecutive frames with the same snapshot produce the same report.
    #[test]
    fn repeated_snapshot_is_stable(raw in snapshot()) {
        let source = SnapshotSource::new("matrix", InputScanSpeed::Fast);
        let handle = source.handle();
        let mut backend = CommunicationBackend::new(ControllerMode::builtin_default(), RecordingSink::new())
            .with_source(Box::new(source));

        handle.store(raw);
        let _first = backend.run_frame();
        let _second = backend.run_frame();
        let _third = backend.run_frame();

        let reports = backend.sink().reports();
        prop_assert_eq!(reports.get(1), reports.get(2));
    }
}
