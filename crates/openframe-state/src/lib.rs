//! Per-frame state snapshots for OpenFrame controller firmware.
//!
//! Everything that flows through one frame of the input pipeline lives here:
//!
//! - **LogicalButton**: closed set of the 20 logical inputs, with their default indices
//! - **InputState**: debounced button snapshot for one scan, stored as a bitmask
//! - **OutputState**: the console-facing report fields, analog values on an 8-bit scale
//! - **Directions**: the direction aggregate derived from a resolved `InputState`
//!
//! These types carry no behavior beyond field access. Resolution, remapping and
//! curve synthesis live in the crates that consume them.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod button;
pub mod directions;
pub mod input;
pub mod output;

pub use button::{BUTTON_COUNT, LogicalButton};
pub use directions::Directions;
pub use input::InputState;
pub use output::{FieldKind, FieldValue, OutputField, OutputState};

use thiserror::Error;

/// Lowest value an analog stick axis reaches on a full digital deflection.
pub const ANALOG_STICK_MIN: u8 = 28;

/// Resting midpoint of an analog stick axis.
pub const ANALOG_STICK_NEUTRAL: u8 = 128;

/// Highest value an analog stick axis reaches on a full digital deflection.
pub const ANALOG_STICK_MAX: u8 = 228;

/// Resting value of an analog trigger.
pub const TRIGGER_RELEASED: u8 = 0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Unknown logical button: {0}")]
    UnknownButton(String),

    #[error("Logical button index {index} out of range (0..{max})")]
    InvalidButtonIndex { index: usize, max: usize },

    #[error("Unknown output field: {0}")]
    UnknownOutputField(String),

    #[error("Output field {field} expects {expected}")]
    FieldKindMismatch {
        field: &'static str,
        expected: FieldKind,
    },
}

pub type StateResult<T> = Result<T, StateError>;
