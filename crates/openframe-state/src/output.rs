//! Console-facing output report fields.

use crate::{ANALOG_STICK_NEUTRAL, StateError, StateResult, TRIGGER_RELEASED};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One frame's worth of console actions.
///
/// Produced fresh each frame and consumed once by the report sender. Serialized
/// field names match the names used by profile documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputState {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub start: bool,
    pub select: bool,
    pub home: bool,
    pub button_l: bool,
    pub button_r: bool,
    pub trigger_l_digital: bool,
    pub trigger_r_digital: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub left_stick_click: bool,
    pub right_stick_click: bool,

    pub left_stick_x: u8,
    pub left_stick_y: u8,
    pub right_stick_x: u8,
    pub right_stick_y: u8,
    pub trigger_l_analog: u8,
    pub trigger_r_analog: u8,
}

impl OutputState {
    /// Report with every digital field released, both sticks centered and
    /// both triggers at rest.
    pub const fn neutral() -> Self {
        Self {
            a: false,
            b: false,
            x: false,
            y: false,
            start: false,
            select: false,
            home: false,
            button_l: false,
            button_r: false,
            trigger_l_digital: false,
            trigger_r_digital: false,
            dpad_up: false,
            dpad_down: false,
            dpad_left: false,
            dpad_right: false,
            left_stick_click: false,
            right_stick_click: false,
            left_stick_x: ANALOG_STICK_NEUTRAL,
            left_stick_y: ANALOG_STICK_NEUTRAL,
            right_stick_x: ANALOG_STICK_NEUTRAL,
            right_stick_y: ANALOG_STICK_NEUTRAL,
            trigger_l_analog: TRIGGER_RELEASED,
            trigger_r_analog: TRIGGER_RELEASED,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    /// Write `value` into `field`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::FieldKindMismatch`] when the value kind does not
    /// match the field kind (a boolean into a stick axis, for instance).
    pub fn assign(&mut self, field: OutputField, value: FieldValue) -> StateResult<()> {
        match value {
            FieldValue::Digital(v) => {
                if let Some(slot) = self.digital_mut(field) {
                    *slot = v;
                    return Ok(());
                }
            }
            FieldValue::Analog(v) => {
                if let Some(slot) = self.analog_mut(field) {
                    *slot = v;
                    return Ok(());
                }
            }
        }
        Err(StateError::FieldKindMismatch {
            field: field.name(),
            expected: field.kind(),
        })
    }

    pub fn get(&self, field: OutputField) -> FieldValue {
        use OutputField as F;
        match field {
            F::A => FieldValue::Digital(self.a),
            F::B => FieldValue::Digital(self.b),
            F::X => FieldValue::Digital(self.x),
            F::Y => FieldValue::Digital(self.y),
            F::Start => FieldValue::Digital(self.start),
            F::Select => FieldValue::Digital(self.select),
            F::Home => FieldValue::Digital(self.home),
            F::ButtonL => FieldValue::Digital(self.button_l),
            F::ButtonR => FieldValue::Digital(self.button_r),
            F::TriggerLDigital => FieldValue::Digital(self.trigger_l_digital),
            F::TriggerRDigital => FieldValue::Digital(self.trigger_r_digital),
            F::DpadUp => FieldValue::Digital(self.dpad_up),
            F::DpadDown => FieldValue::Digital(self.dpad_down),
            F::DpadLeft => FieldValue::Digital(self.dpad_left),
            F::DpadRight => FieldValue::Digital(self.dpad_right),
            F::LeftStickClick => FieldValue::Digital(self.left_stick_click),
            F::RightStickClick => FieldValue::Digital(self.right_stick_click),
            F::LeftStickX => FieldValue::Analog(self.left_stick_x),
            F::LeftStickY => FieldValue::Analog(self.left_stick_y),
            F::RightStickX => FieldValue::Analog(self.right_stick_x),
            F::RightStickY => FieldValue::Analog(self.right_stick_y),
            F::TriggerLAnalog => FieldValue::Analog(self.trigger_l_analog),
            F::TriggerRAnalog => FieldValue::Analog(self.trigger_r_analog),
        }
    }

    fn digital_mut(&mut self, field: OutputField) -> Option<&mut bool> {
        use OutputField as F;
        match field {
            F::A => Some(&mut self.a),
            F::B => Some(&mut self.b),
            F::X => Some(&mut self.x),
            F::Y => Some(&mut self.y),
            F::Start => Some(&mut self.start),
            F::Select => Some(&mut self.select),
            F::Home => Some(&mut self.home),
            F::ButtonL => Some(&mut self.button_l),
            F::ButtonR => Some(&mut self.button_r),
            F::TriggerLDigital => Some(&mut self.trigger_l_digital),
            F::TriggerRDigital => Some(&mut self.trigger_r_digital),
            F::DpadUp => Some(&mut self.dpad_up),
            F::DpadDown => Some(&mut self.dpad_down),
            F::DpadLeft => Some(&mut self.dpad_left),
            F::DpadRight => Some(&mut self.dpad_right),
            F::LeftStickClick => Some(&mut self.left_stick_click),
            F::RightStickClick => Some(&mut self.right_stick_click),
            _ => None,
        }
    }

    fn analog_mut(&mut self, field: OutputField) -> Option<&mut u8> {
        use OutputField as F;
        match field {
            F::LeftStickX => Some(&mut self.left_stick_x),
            F::LeftStickY => Some(&mut self.left_stick_y),
            F::RightStickX => Some(&mut self.right_stick_x),
            F::RightStickY => Some(&mut self.right_stick_y),
            F::TriggerLAnalog => Some(&mut self.trigger_l_analog),
            F::TriggerRAnalog => Some(&mut self.trigger_r_analog),
            _ => None,
        }
    }
}

impl Default for OutputState {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Identifier for one [`OutputState`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputField {
    A,
    B,
    X,
    Y,
    Start,
    Select,
    Home,
    ButtonL,
    ButtonR,
    TriggerLDigital,
    TriggerRDigital,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftStickClick,
    RightStickClick,
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    TriggerLAnalog,
    TriggerRAnalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Digital,
    Analog,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Digital => f.write_str("a boolean"),
            FieldKind::Analog => f.write_str("an integer in 0..=255"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Digital(bool),
    Analog(u8),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Digital(_) => FieldKind::Digital,
            FieldValue::Analog(_) => FieldKind::Analog,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Digital(v) => write!(f, "{v}"),
            FieldValue::Analog(v) => write!(f, "{v}"),
        }
    }
}

impl OutputField {
    pub const ALL: [OutputField; 23] = [
        OutputField::A,
        OutputField::B,
        OutputField::X,
        OutputField::Y,
        OutputField::Start,
        OutputField::Select,
        OutputField::Home,
        OutputField::ButtonL,
        OutputField::ButtonR,
        OutputField::TriggerLDigital,
        OutputField::TriggerRDigital,
        OutputField::DpadUp,
        OutputField::DpadDown,
        OutputField::DpadLeft,
        OutputField::DpadRight,
        OutputField::LeftStickClick,
        OutputField::RightStickClick,
        OutputField::LeftStickX,
        OutputField::LeftStickY,
        OutputField::RightStickX,
        OutputField::RightStickY,
        OutputField::TriggerLAnalog,
        OutputField::TriggerRAnalog,
    ];

    pub const fn kind(self) -> FieldKind {
        match self {
            OutputField::LeftStickX
            | OutputField::LeftStickY
            | OutputField::RightStickX
            | OutputField::RightStickY
            | OutputField::TriggerLAnalog
            | OutputField::TriggerRAnalog => FieldKind::Analog,
            _ => FieldKind::Digital,
        }
    }

    /// Serialized camelCase name.
    pub const fn name(self) -> &'static str {
        match self {
            OutputField::A => "a",
            OutputField::B => "b",
            OutputField::X => "x",
            OutputField::Y => "y",
            OutputField::Start => "start",
            OutputField::Select => "select",
            OutputField::Home => "home",
            OutputField::ButtonL => "buttonL",
            OutputField::ButtonR => "buttonR",
            OutputField::TriggerLDigital => "triggerLDigital",
            OutputField::TriggerRDigital => "triggerRDigital",
            OutputField::DpadUp => "dpadUp",
            OutputField::DpadDown => "dpadDown",
            OutputField::DpadLeft => "dpadLeft",
            OutputField::DpadRight => "dpadRight",
            OutputField::LeftStickClick => "leftStickClick",
            OutputField::RightStickClick => "rightStickClick",
            OutputField::LeftStickX => "leftStickX",
            OutputField::LeftStickY => "leftStickY",
            OutputField::RightStickX => "rightStickX",
            OutputField::RightStickY => "rightStickY",
            OutputField::TriggerLAnalog => "triggerLAnalog",
            OutputField::TriggerRAnalog => "triggerRAnalog",
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputField {
    type Err = StateError;

    /// Accepts the camelCase field names plus the controller-face aliases
    /// `zl`, `zr`, `l` and `r`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "zl" => OutputField::ButtonL,
            "zr" => OutputField::ButtonR,
            "l" => OutputField::TriggerLDigital,
            "r" => OutputField::TriggerRDigital,
            other => OutputField::ALL
                .iter()
                .copied()
                .find(|field| field.name() == other)
                .ok_or_else(|| StateError::UnknownOutputField(other.to_string()))?,
        };
        Ok(field)
    }
}
