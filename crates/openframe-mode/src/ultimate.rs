//! Ultimate on the B0XX R4 layout.

use crate::calibration::{
    CStickCalibration, Rung, ULTIMATE_R4_C_STICK, ULTIMATE_R4_LADDER, deflect,
    left_stick_magnitudes,
};
use crate::logic::ModeLogic;
use openframe_state::{Directions, InputState, LogicalButton as Btn, OutputState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UltimateR4 {
    ladder: &'static [Rung],
    c_stick: CStickCalibration,
}

impl UltimateR4 {
    pub const fn new() -> Self {
        Self {
            ladder: &ULTIMATE_R4_LADDER,
            c_stick: ULTIMATE_R4_C_STICK,
        }
    }

    pub fn ladder(&self) -> &'static [Rung] {
        self.ladder
    }

    pub fn c_stick(&self) -> &CStickCalibration {
        &self.c_stick
    }
}

impl Default for UltimateR4 {
    fn default() -> Self {
        Self::new()
    }
}

/// Both modifiers held turn the C buttons into a D-pad.
fn dpad_layer(inputs: &InputState) -> bool {
    inputs.is_pressed(Btn::ModX) && inputs.is_pressed(Btn::ModY)
}

impl ModeLogic for UltimateR4 {
    fn name(&self) -> &'static str {
        "ultimate_r4"
    }

    fn update_digital(&self, inputs: &InputState, out: &mut OutputState) {
        out.a = inputs.is_pressed(Btn::A);
        out.b = inputs.is_pressed(Btn::B);
        out.x = inputs.is_pressed(Btn::X);
        out.y = inputs.is_pressed(Btn::Y);
        out.start = inputs.is_pressed(Btn::Start);
        out.button_r = inputs.is_pressed(Btn::Z);
        out.trigger_l_digital = inputs.is_pressed(Btn::L);
        out.trigger_r_digital = inputs.is_pressed(Btn::R);

        if dpad_layer(inputs) {
            out.dpad_up = inputs.is_pressed(Btn::CUp);
            out.dpad_down = inputs.is_pressed(Btn::CDown);
            out.dpad_left = inputs.is_pressed(Btn::CLeft);
            out.dpad_right = inputs.is_pressed(Btn::CRight);
            out.select = inputs.is_pressed(Btn::Lightshield);
            out.home = inputs.is_pressed(Btn::Midshield);
        }
    }

    fn update_analog(&self, inputs: &InputState, out: &mut OutputState) {
        let dirs = Directions::from_inputs(inputs);

        let (x, y) = left_stick_magnitudes(self.ladder, inputs, &dirs);
        out.left_stick_x = deflect(dirs.x, x);
        out.left_stick_y = deflect(dirs.y, y);

        (out.right_stick_x, out.right_stick_y) = self.c_stick.resolve(inputs, &dirs);
    }
}
