//! Mode with no built-in logic.

use crate::logic::ModeLogic;
use openframe_state::{InputState, OutputState};

/// Leaves the report neutral so that every output comes from the profile's
/// rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileOnly;

impl ModeLogic for ProfileOnly {
    fn name(&self) -> &'static str {
        "profile_only"
    }

    fn update_digital(&self, _inputs: &InputState, _out: &mut OutputState) {}

    fn update_analog(&self, _inputs: &InputState, _out: &mut OutputState) {}
}
