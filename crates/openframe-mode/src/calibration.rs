//! Analog calibration tables.
//!
//! Stick magnitudes are offsets from [`ANALOG_STICK_NEUTRAL`] on the 8-bit
//! scale, multiplied by the sign of the held direction. Each value reproduces
//! a specific in-game action and must not be tuned.
//!
//! The left stick is driven by a priority ladder of [`Rung`]s. Every rung whose
//! condition holds writes its magnitudes, in table order, so the last matching
//! rung for an axis decides it. More specific combinations therefore sit
//! further down the table: within a layer the shield rungs follow the
//! cardinals, the diagonals follow those, and the face-button tilts close it.

use openframe_state::{ANALOG_STICK_NEUTRAL, Directions, InputState, LogicalButton};
use DirectionClass::{Diagonal, DiagonalLeftward};
use Layer::{Base, ModX, ModY};
use Shield::{Any, Held, Released};

/// Which modifier layer a rung belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Applies with or without modifiers.
    Base,
    ModX,
    ModY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionClass {
    /// Any horizontal deflection, including diagonals.
    Horizontal,
    /// Any vertical deflection, including diagonals.
    Vertical,
    Diagonal,
    /// Diagonal with the stick pushed left.
    DiagonalLeftward,
}

impl DirectionClass {
    pub fn matches(self, dirs: &Directions) -> bool {
        match self {
            DirectionClass::Horizontal => dirs.horizontal,
            DirectionClass::Vertical => dirs.vertical,
            DirectionClass::Diagonal => dirs.diagonal,
            DirectionClass::DiagonalLeftward => dirs.diagonal && dirs.x < 0,
        }
    }
}

/// Shield-button requirement of a rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shield {
    Any,
    Held,
    Released,
}

/// One entry of the left-stick ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung {
    /// Action the magnitudes reproduce.
    pub name: &'static str,
    pub layer: Layer,
    pub class: DirectionClass,
    pub shield: Shield,
    /// Extra buttons that must all be held.
    pub with: InputState,
    pub x: Option<u8>,
    pub y: Option<u8>,
}

impl Rung {
    const fn x(name: &'static str, layer: Layer, shield: Shield, with: InputState, x: u8) -> Self {
        Self {
            name,
            layer,
            class: DirectionClass::Horizontal,
            shield,
            with,
            x: Some(x),
            y: None,
        }
    }

    const fn y(name: &'static str, layer: Layer, shield: Shield, with: InputState, y: u8) -> Self {
        Self {
            name,
            layer,
            class: DirectionClass::Vertical,
            shield,
            with,
            x: None,
            y: Some(y),
        }
    }

    const fn xy(
        name: &'static str,
        layer: Layer,
        class: DirectionClass,
        shield: Shield,
        with: InputState,
        x: u8,
        y: u8,
    ) -> Self {
        Self {
            name,
            layer,
            class,
            shield,
            with,
            x: Some(x),
            y: Some(y),
        }
    }

    /// True when this rung applies to the resolved snapshot.
    pub fn applies(&self, inputs: &InputState, dirs: &Directions) -> bool {
        let layer = match self.layer {
            Layer::Base => true,
            Layer::ModX => inputs.is_pressed(LogicalButton::ModX),
            Layer::ModY => inputs.is_pressed(LogicalButton::ModY),
        };
        let shield = match self.shield {
            Shield::Any => true,
            Shield::Held => shield_held(inputs),
            Shield::Released => !shield_held(inputs),
        };
        layer && shield && self.class.matches(dirs) && inputs.contains(self.with)
    }
}

/// Full-press shields tilt the stick differently.
pub fn shield_held(inputs: &InputState) -> bool {
    inputs.is_pressed(LogicalButton::L) || inputs.is_pressed(LogicalButton::R)
}

/// `ANALOG_STICK_NEUTRAL + sign(direction) * magnitude`, clamped to the scale.
pub fn deflect(direction: i8, magnitude: u8) -> u8 {
    let offset = i16::from(direction.signum()).saturating_mul(i16::from(magnitude));
    let value = i16::from(ANALOG_STICK_NEUTRAL)
        .saturating_add(offset)
        .clamp(0, i16::from(u8::MAX));
    u8::try_from(value).unwrap_or(ANALOG_STICK_NEUTRAL)
}

/// Walk the ladder and return the winning `(x, y)` magnitudes.
pub fn left_stick_magnitudes(ladder: &[Rung], inputs: &InputState, dirs: &Directions) -> (u8, u8) {
    ladder
        .iter()
        .filter(|rung| rung.applies(inputs, dirs))
        .fold((0, 0), |(x, y), rung| {
            (rung.x.unwrap_or(x), rung.y.unwrap_or(y))
        })
}

const NONE: InputState = InputState::new();
const A: InputState = InputState::new().with(LogicalButton::A);
const B: InputState = InputState::new().with(LogicalButton::B);
const C_DOWN: InputState = InputState::new().with(LogicalButton::CDown);
const C_LEFT: InputState = InputState::new().with(LogicalButton::CLeft);
const C_UP: InputState = InputState::new().with(LogicalButton::CUp);
const C_RIGHT: InputState = InputState::new().with(LogicalButton::CRight);
const B_C_DOWN: InputState = B.with(LogicalButton::CDown);
const B_C_LEFT: InputState = B.with(LogicalButton::CLeft);
const B_C_UP: InputState = B.with(LogicalButton::CUp);
const B_C_RIGHT: InputState = B.with(LogicalButton::CRight);

/// Left-stick ladder for Ultimate on the B0XX R4 layout.
pub const ULTIMATE_R4_LADDER: [Rung; 38] = [
    Rung::x("full_horizontal", Base, Any, NONE, 100),
    Rung::y("full_vertical", Base, Any, NONE, 100),
    Rung::xy("full_diagonal", Base, Diagonal, Any, NONE, 100, 100),
    // Mod X
    Rung::x("walk_fast", ModX, Any, NONE, 53),
    Rung::x("shield_tilt_horizontal", ModX, Held, NONE, 51),
    Rung::y("crouch_tilt", ModX, Any, NONE, 44),
    Rung::y("shield_tilt_vertical", ModX, Held, NONE, 51),
    Rung::xy("modx_diagonal", ModX, Diagonal, Any, NONE, 53, 35),
    Rung::xy("shield_tilt_diagonal", ModX, Diagonal, Held, NONE, 51, 30),
    Rung::xy("recovery_angle", ModX, Diagonal, Released, NONE, 53, 35),
    Rung::xy("recovery_angle_c_down", ModX, Diagonal, Released, C_DOWN, 53, 43),
    Rung::xy("recovery_angle_c_left", ModX, Diagonal, Released, C_LEFT, 53, 39),
    Rung::xy("recovery_angle_c_up", ModX, Diagonal, Released, C_UP, 53, 31),
    Rung::xy("recovery_angle_c_right", ModX, Diagonal, Released, C_RIGHT, 53, 28),
    Rung::xy("extended_recovery", ModX, Diagonal, Released, B, 67, 44),
    Rung::xy("extended_recovery_c_down", ModX, Diagonal, Released, B_C_DOWN, 67, 55),
    Rung::xy("extended_recovery_c_left", ModX, Diagonal, Released, B_C_LEFT, 67, 49),
    Rung::xy("extended_recovery_c_up", ModX, Diagonal, Released, B_C_UP, 67, 39),
    Rung::xy("extended_recovery_c_right", ModX, Diagonal, Released, B_C_RIGHT, 72, 38),
    Rung::x("ftilt", ModX, Any, A, 36),
    Rung::xy("angled_ftilt", ModX, Diagonal, Any, A, 36, 26),
    // Mod Y
    Rung::x("walk_slow", ModY, Any, NONE, 41),
    Rung::y("vertical_drift", ModY, Any, NONE, 53),
    Rung::xy("mody_diagonal", ModY, Diagonal, Any, NONE, 35, 53),
    Rung::xy("shield_drop", ModY, Diagonal, Held, NONE, 38, 70),
    Rung::xy("shield_drop_left", ModY, DiagonalLeftward, Held, NONE, 40, 68),
    Rung::xy("steep_recovery", ModY, Diagonal, Released, NONE, 35, 53),
    Rung::xy("steep_recovery_c_down", ModY, Diagonal, Released, C_DOWN, 43, 53),
    Rung::xy("steep_recovery_c_left", ModY, Diagonal, Released, C_LEFT, 39, 53),
    Rung::xy("steep_recovery_c_up", ModY, Diagonal, Released, C_UP, 31, 53),
    Rung::xy("steep_recovery_c_right", ModY, Diagonal, Released, C_RIGHT, 28, 53),
    Rung::xy("extended_steep", ModY, Diagonal, Released, B, 44, 67),
    Rung::xy("extended_steep_c_down", ModY, Diagonal, Released, B_C_DOWN, 55, 67),
    Rung::xy("extended_steep_c_left", ModY, Diagonal, Released, B_C_LEFT, 49, 67),
    Rung::xy("extended_steep_c_up", ModY, Diagonal, Released, B_C_UP, 39, 67),
    Rung::xy("extended_steep_c_right", ModY, Diagonal, Released, B_C_RIGHT, 38, 72),
    Rung::x("ftilt_slow", ModY, Any, A, 36),
    Rung::y("utilt_dtilt", ModY, Any, A, 36),
];

/// Find a ladder entry by action name.
pub fn rung(ladder: &'static [Rung], name: &str) -> Option<&'static Rung> {
    ladder.iter().find(|rung| rung.name == name)
}

/// C-stick magnitudes.
///
/// The C-stick is synthesized independently of the left stick, except that
/// Mod X angles smashes using the left stick's vertical direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CStickCalibration {
    /// Single-axis deflection.
    pub cardinal: u8,
    /// Mod X with a horizontal C input: `(cx magnitude, left-stick y magnitude)`.
    pub angled_smash: (u8, u8),
    /// Both C axes deflected. Overrides everything above.
    pub diagonal: (u8, u8),
}

pub const ULTIMATE_R4_C_STICK: CStickCalibration = CStickCalibration {
    cardinal: 100,
    angled_smash: (127, 59),
    diagonal: (42, 68),
};

impl CStickCalibration {
    /// Right-stick `(x, y)` for a resolved snapshot.
    pub fn resolve(&self, inputs: &InputState, dirs: &Directions) -> (u8, u8) {
        if inputs.is_pressed(LogicalButton::ModX) && inputs.is_pressed(LogicalButton::ModY) {
            return (ANALOG_STICK_NEUTRAL, ANALOG_STICK_NEUTRAL);
        }
        if dirs.cx != 0 && dirs.cy != 0 {
            return (
                deflect(dirs.cx, self.diagonal.0),
                deflect(dirs.cy, self.diagonal.1),
            );
        }
        if inputs.is_pressed(LogicalButton::ModX) && dirs.cx != 0 {
            return (
                deflect(dirs.cx, self.angled_smash.0),
                deflect(dirs.y, self.angled_smash.1),
            );
        }
        (
            deflect(dirs.cx, self.cardinal),
            deflect(dirs.cy, self.cardinal),
        )
    }
}
