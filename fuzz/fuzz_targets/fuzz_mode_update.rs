//! Fuzzes the per-frame mode update.
//!
//! Each 4-byte chunk is one raw snapshot; every mode and SOCD policy runs the
//! same sequence. Must never panic, and no stick axis may leave the 8-bit
//! scale's reachable range.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_mode_update
#![no_main]
use libfuzzer_sys::fuzz_target;
use openframe_mode::{ControllerMode, ModeKind};
use openframe_profile::Profile;
use openframe_socd::SocdPolicy;
use openframe_state::InputState;

fuzz_target!(|data: &[u8]| {
    let frames: Vec<InputState> = data
        .chunks_exact(4)
        .map(|chunk| {
            let bits = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            InputState::from_bits(bits & 0x000f_ffff)
        })
        .collect();

    for kind in ModeKind::ALL {
        for policy in SocdPolicy::ALL {
            let mut mode = ControllerMode::new(kind, policy, Profile::builtin());
            for raw in &frames {
                let out = mode.update_outputs(raw);
                if kind == ModeKind::UltimateR4 {
                    assert!((28..=228).contains(&out.left_stick_x));
                    assert!((28..=228).contains(&out.left_stick_y));
                }
            }
        }
    }
});
