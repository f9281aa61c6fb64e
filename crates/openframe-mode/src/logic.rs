//! Variant interface and the closed set of controller modes.

use crate::profile_only::ProfileOnly;
use crate::ultimate::UltimateR4;
use crate::{ModeError, ModeResult};
use openframe_state::{InputState, OutputState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-game output computation.
///
/// Both calls receive the remapped, SOCD-resolved snapshot and write into an
/// output that the driver has already reset to neutral. Implementations keep
/// no per-frame state.
pub trait ModeLogic {
    fn name(&self) -> &'static str;

    /// Button pass-through and layers.
    fn update_digital(&self, inputs: &InputState, out: &mut OutputState);

    /// Stick and trigger synthesis.
    fn update_analog(&self, inputs: &InputState, out: &mut OutputState);
}

/// Selector for [`ModeVariant`], as written in configuration and on the
/// command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    #[default]
    UltimateR4,
    ProfileOnly,
}

impl ModeKind {
    pub const ALL: [ModeKind; 2] = [ModeKind::UltimateR4, ModeKind::ProfileOnly];

    pub const fn name(self) -> &'static str {
        match self {
            ModeKind::UltimateR4 => "ultimate_r4",
            ModeKind::ProfileOnly => "profile_only",
        }
    }

    pub fn variant(self) -> ModeVariant {
        match self {
            ModeKind::UltimateR4 => ModeVariant::UltimateR4(UltimateR4::new()),
            ModeKind::ProfileOnly => ModeVariant::ProfileOnly(ProfileOnly),
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModeKind {
    type Err = ModeError;

    fn from_str(s: &str) -> ModeResult<Self> {
        let folded: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "ultimater4" | "ultimate" | "ult" => Ok(ModeKind::UltimateR4),
            "profileonly" | "profile" => Ok(ModeKind::ProfileOnly),
            _ => Err(ModeError::UnknownMode(s.to_string())),
        }
    }
}

/// Every supported controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeVariant {
    UltimateR4(UltimateR4),
    ProfileOnly(ProfileOnly),
}

impl ModeVariant {
    pub fn kind(&self) -> ModeKind {
        match self {
            ModeVariant::UltimateR4(_) => ModeKind::UltimateR4,
            ModeVariant::ProfileOnly(_) => ModeKind::ProfileOnly,
        }
    }
}

impl ModeLogic for ModeVariant {
    fn name(&self) -> &'static str {
        match self {
            ModeVariant::UltimateR4(mode) => mode.name(),
            ModeVariant::ProfileOnly(mode) => mode.name(),
        }
    }

    #[inline]
    fn update_digital(&self, inputs: &InputState, out: &mut OutputState) {
        match self {
            ModeVariant::UltimateR4(mode) => mode.update_digital(inputs, out),
            ModeVariant::ProfileOnly(mode) => mode.update_digital(inputs, out),
        }
    }

    #[inline]
    fn update_analog(&self, inputs: &InputState, out: &mut OutputState) {
        match self {
            ModeVariant::UltimateR4(mode) => mode.update_analog(inputs, out),
            ModeVariant::ProfileOnly(mode) => mode.update_analog(inputs, out),
        }
    }
}
