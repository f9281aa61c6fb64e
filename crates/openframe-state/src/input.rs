//! Debounced input snapshot for one scan.

use crate::button::{BUTTON_COUNT, LogicalButton};
use serde::{Deserialize, Serialize};

const VALID_MASK: u32 = (1 << BUTTON_COUNT) - 1;

/// Debounced state of every logical input for one frame.
///
/// Stored as a bitmask indexed by [`LogicalButton::index`]. Depending on where
/// it sits in the pipeline the bits are read as physical positions (straight
/// from the input sources) or as logical buttons (after remapping).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputState {
    buttons: u32,
}

impl InputState {
    /// Snapshot with nothing held.
    pub const fn new() -> Self {
        Self { buttons: 0 }
    }

    /// Build from raw bits. Bits beyond the button count are dropped.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            buttons: bits & VALID_MASK,
        }
    }

    pub fn from_buttons(buttons: &[LogicalButton]) -> Self {
        buttons
            .iter()
            .fold(Self::new(), |state, button| state.with(*button))
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.buttons
    }

    #[inline]
    pub const fn is_pressed(&self, button: LogicalButton) -> bool {
        (self.buttons & button.mask()) != 0
    }

    /// Index-based access, for callers holding positions rather than buttons.
    #[inline]
    pub fn is_index_pressed(&self, index: usize) -> bool {
        index < BUTTON_COUNT && (self.buttons & (1 << index)) != 0
    }

    pub fn set(&mut self, button: LogicalButton, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    #[inline]
    pub fn press(&mut self, button: LogicalButton) {
        self.set(button, true);
    }

    #[inline]
    pub fn release(&mut self, button: LogicalButton) {
        self.set(button, false);
    }

    /// Builder form of [`press`](Self::press).
    #[must_use]
    pub const fn with(self, button: LogicalButton) -> Self {
        Self {
            buttons: self.buttons | button.mask(),
        }
    }

    pub fn clear(&mut self) {
        self.buttons = 0;
    }

    /// Union of two snapshots.
    #[must_use]
    pub const fn union(self, other: InputState) -> Self {
        Self {
            buttons: self.buttons | other.buttons,
        }
    }

    /// True when every button held in `required` is also held here.
    #[inline]
    pub const fn contains(&self, required: InputState) -> bool {
        (self.buttons & required.buttons) == required.buttons
    }

    pub const fn is_empty(&self) -> bool {
        self.buttons == 0
    }

    pub const fn pressed_count(&self) -> u32 {
        self.buttons.count_ones()
    }

    pub fn pressed(&self) -> impl Iterator<Item = LogicalButton> + '_ {
        LogicalButton::ALL
            .iter()
            .copied()
            .filter(|button| self.is_pressed(*button))
    }
}

impl FromIterator<LogicalButton> for InputState {
    fn from_iter<I: IntoIterator<Item = LogicalButton>>(iter: I) -> Self {
        iter.into_iter()
            .fold(InputState::new(), |state, button| state.with(button))
    }
}
