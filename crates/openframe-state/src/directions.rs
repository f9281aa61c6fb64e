//! Direction aggregate derived from a resolved input snapshot.

use crate::button::LogicalButton;
use crate::input::InputState;

/// Signed unit deflection on each stick axis plus the axis-class flags.
///
/// Computed fresh every frame from SOCD-resolved inputs and never cached. When
/// both directions of an axis are still held (no resolution applied) the axis
/// reads as centered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub x: i8,
    pub y: i8,
    pub cx: i8,
    pub cy: i8,
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl Directions {
    pub fn from_inputs(inputs: &InputState) -> Self {
        let x = axis(inputs, LogicalButton::Left, LogicalButton::Right);
        let y = axis(inputs, LogicalButton::Down, LogicalButton::Up);
        let cx = axis(inputs, LogicalButton::CLeft, LogicalButton::CRight);
        let cy = axis(inputs, LogicalButton::CDown, LogicalButton::CUp);

        let horizontal = x != 0;
        let vertical = y != 0;
        Self {
            x,
            y,
            cx,
            cy,
            horizontal,
            vertical,
            diagonal: horizontal && vertical,
        }
    }

    /// True when either C-stick axis is deflected.
    pub fn c_stick_active(&self) -> bool {
        self.cx != 0 || self.cy != 0
    }
}

fn axis(inputs: &InputState, negative: LogicalButton, positive: LogicalButton) -> i8 {
    match (inputs.is_pressed(negative), inputs.is_pressed(positive)) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}
