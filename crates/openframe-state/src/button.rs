//! Logical button identifiers.

use crate::{StateError, StateResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of logical buttons on the reference layout.
pub const BUTTON_COUNT: usize = 20;

/// A logical input, identified by its default index.
///
/// The discriminant is the default (0-based) index used by profile documents
/// and by the physical wiring of the reference layout. Profile documents use
/// the same order, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LogicalButton {
    L = 0,
    Left = 1,
    Down = 2,
    Right = 3,
    ModX = 4,
    ModY = 5,
    Start = 6,
    R = 7,
    Y = 8,
    Lightshield = 9,
    Midshield = 10,
    B = 11,
    X = 12,
    Z = 13,
    Up = 14,
    CLeft = 15,
    CUp = 16,
    CDown = 17,
    A = 18,
    CRight = 19,
}

impl LogicalButton {
    /// Every logical button in default index order.
    pub const ALL: [LogicalButton; BUTTON_COUNT] = [
        LogicalButton::L,
        LogicalButton::Left,
        LogicalButton::Down,
        LogicalButton::Right,
        LogicalButton::ModX,
        LogicalButton::ModY,
        LogicalButton::Start,
        LogicalButton::R,
        LogicalButton::Y,
        LogicalButton::Lightshield,
        LogicalButton::Midshield,
        LogicalButton::B,
        LogicalButton::X,
        LogicalButton::Z,
        LogicalButton::Up,
        LogicalButton::CLeft,
        LogicalButton::CUp,
        LogicalButton::CDown,
        LogicalButton::A,
        LogicalButton::CRight,
    ];

    /// Default 0-based index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit for this button inside an [`InputState`](crate::InputState) mask.
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << (self as u32)
    }

    pub fn from_index(index: usize) -> StateResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(StateError::InvalidButtonIndex {
                index,
                max: BUTTON_COUNT,
            })
    }

    /// Canonical snake_case name, as used in remap documents.
    pub const fn name(self) -> &'static str {
        match self {
            LogicalButton::L => "l",
            LogicalButton::Left => "left",
            LogicalButton::Down => "down",
            LogicalButton::Right => "right",
            LogicalButton::ModX => "mod_x",
            LogicalButton::ModY => "mod_y",
            LogicalButton::Start => "start",
            LogicalButton::R => "r",
            LogicalButton::Y => "y",
            LogicalButton::Lightshield => "lightshield",
            LogicalButton::Midshield => "midshield",
            LogicalButton::B => "b",
            LogicalButton::X => "x",
            LogicalButton::Z => "z",
            LogicalButton::Up => "up",
            LogicalButton::CLeft => "c_left",
            LogicalButton::CUp => "c_up",
            LogicalButton::CDown => "c_down",
            LogicalButton::A => "a",
            LogicalButton::CRight => "c_right",
        }
    }

    /// True for the eight stick directions (left stick and C-stick).
    pub const fn is_direction(self) -> bool {
        matches!(
            self,
            LogicalButton::Left
                | LogicalButton::Right
                | LogicalButton::Down
                | LogicalButton::Up
                | LogicalButton::CLeft
                | LogicalButton::CRight
                | LogicalButton::CDown
                | LogicalButton::CUp
        )
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalButton {
    type Err = StateError;

    /// Accepts the snake_case name, the camelCase spelling (`modX`, `cLeft`)
    /// and ignores ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|button| button.name().replace('_', "") == folded)
            .ok_or_else(|| StateError::UnknownButton(s.to_string()))
    }
}
