//! Opposed-direction pairs.

use crate::policy::SocdPolicy;
use openframe_state::LogicalButton;

/// Two opposed logical directions plus the policy that arbitrates them.
///
/// A pair relates buttons, it does not own them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocdPair {
    pub dir1: LogicalButton,
    pub dir2: LogicalButton,
    pub policy: SocdPolicy,
}

impl SocdPair {
    pub const fn new(dir1: LogicalButton, dir2: LogicalButton, policy: SocdPolicy) -> Self {
        Self { dir1, dir2, policy }
    }

    /// The four stick axes: left/right, down/up, c_left/c_right, c_down/c_up.
    pub const fn standard(policy: SocdPolicy) -> [SocdPair; 4] {
        Self::standard_split(policy, policy)
    }

    /// The four stick axes with separate policies for the horizontal pairs
    /// (left/right and c_left/c_right) and the vertical pairs.
    pub const fn standard_split(horizontal: SocdPolicy, vertical: SocdPolicy) -> [SocdPair; 4] {
        [
            SocdPair::new(LogicalButton::Left, LogicalButton::Right, horizontal),
            SocdPair::new(LogicalButton::Down, LogicalButton::Up, vertical),
            SocdPair::new(LogicalButton::CLeft, LogicalButton::CRight, horizontal),
            SocdPair::new(LogicalButton::CDown, LogicalButton::CUp, vertical),
        ]
    }

    pub fn involves(&self, button: LogicalButton) -> bool {
        self.dir1 == button || self.dir2 == button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_pairs_cover_all_directions() {
        let pairs = SocdPair::standard(SocdPolicy::Neutral);
        for button in LogicalButton::ALL.iter().filter(|b| b.is_direction()) {
            let owners = pairs.iter().filter(|p| p.involves(*button)).count();
            assert_eq!(owners, 1, "{button}");
        }
    }

    #[test]
    fn test_split_policies() {
        let pairs = SocdPair::standard_split(SocdPolicy::Neutral, SocdPolicy::FirstInputPriority);
        let horizontal: Vec<_> = pairs
            .iter()
            .filter(|p| p.policy == SocdPolicy::Neutral)
            .map(|p| p.dir1)
            .collect();
        assert_eq!(horizontal, vec![LogicalButton::Left, LogicalButton::CLeft]);
    }
}
