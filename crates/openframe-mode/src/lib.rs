//! Controller modes for OpenFrame.
//!
//! A [`ControllerMode`] turns one raw input snapshot into one output report.
//! Every frame it runs the same sequence:
//!
//! 1. **Remap**: physical positions to logical buttons, through the profile's
//!    [`RemapTable`](openframe_profile::RemapTable)
//! 2. **Resolve**: SOCD conflicts on the four stick axes
//! 3. **Digital**: the variant's button pass-through and layers
//! 4. **Analog**: the variant's stick synthesis, then the profile's rule overlay
//!
//! The per-game logic lives behind the [`ModeLogic`] trait and is selected from
//! the closed [`ModeVariant`] set at construction time. Analog magnitudes are
//! data: see [`calibration`].
//!
//! # Example
//!
//! ```
//! use openframe_mode::ControllerMode;
//! use openframe_state::{InputState, LogicalButton};
//!
//! let mut mode = ControllerMode::builtin_default();
//! let out = mode.update_outputs(&InputState::from_buttons(&[LogicalButton::ModX, LogicalButton::Left]));
//! assert_eq!(out.left_stick_x, 75);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod calibration;
pub mod controller;
pub mod logic;
pub mod profile_only;
pub mod ultimate;

pub use calibration::{CStickCalibration, DirectionClass, Layer, Rung, Shield};
pub use controller::ControllerMode;
pub use logic::{ModeKind, ModeLogic, ModeVariant};
pub use profile_only::ProfileOnly;
pub use ultimate::UltimateR4;

use openframe_profile::ProfileError;
use openframe_socd::SocdError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("SOCD configuration error: {0}")]
    Socd(#[from] SocdError),

    #[error("Unknown controller mode: {0}")]
    UnknownMode(String),
}

pub type ModeResult<T> = Result<T, ModeError>;
