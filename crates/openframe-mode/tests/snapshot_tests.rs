//! Snapshot tests for representative output reports.

use insta::assert_snapshot;
use openframe_mode::{ControllerMode, ModeError, ModeKind};
use openframe_state::{InputState, LogicalButton};

use LogicalButton::*;

fn report(held: &[LogicalButton]) -> Result<String, serde_json::Error> {
    let mut mode = ControllerMode::builtin_default();
    serde_json::to_string(&mode.update_outputs(&InputState::from_buttons(held)))
}

#[test]
fn test_angled_recovery_report() -> Result<(), serde_json::Error> {
    assert_snapshot!(
        report(&[ModX, Up, Right, B, CDown])?,
        @r#"{"a":false,"b":true,"x":false,"y":false,"start":false,"select":false,"home":false,"buttonL":false,"buttonR":false,"triggerLDigital":false,"triggerRDigital":false,"dpadUp":false,"dpadDown":false,"dpadLeft":false,"dpadRight":false,"leftStickClick":false,"rightStickClick":false,"leftStickX":195,"leftStickY":183,"rightStickX":128,"rightStickY":28,"triggerLAnalog":0,"triggerRAnalog":0}"#
    );
    Ok(())
}

#[test]
fn test_dpad_layer_report() -> Result<(), serde_json::Error> {
    assert_snapshot!(
        report(&[ModX, ModY, CLeft, Midshield])?,
        @r#"{"a":false,"b":false,"x":false,"y":false,"start":false,"select":false,"home":true,"buttonL":false,"buttonR":false,"triggerLDigital":false,"triggerRDigital":false,"dpadUp":false,"dpadDown":false,"dpadLeft":true,"dpadRight":false,"leftStickClick":false,"rightStickClick":false,"leftStickX":128,"leftStickY":128,"rightStickX":128,"rightStickY":128,"triggerLAnalog":0,"triggerRAnalog":0}"#
    );
    Ok(())
}

#[test]
fn test_mode_error_messages() {
    assert_snapshot!(
        ModeError::UnknownMode("melee".to_string()).to_string(),
        @"Unknown controller mode: melee"
    );
    assert_snapshot!(ModeKind::ProfileOnly.to_string(), @"profile_only");
}
