//! Logical-to-physical button remapping.

use crate::{ProfileError, ProfileResult};
use openframe_state::{BUTTON_COUNT, InputState, LogicalButton};

/// For every logical button, the physical position that drives it.
///
/// Positions are 0-based internally. The table is always a permutation: no
/// physical position drives two logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapTable {
    physical: [usize; BUTTON_COUNT],
}

impl RemapTable {
    /// Every logical button on its default position.
    pub const fn identity() -> Self {
        let mut physical = [0; BUTTON_COUNT];
        let mut i = 0;
        while i < BUTTON_COUNT {
            physical[i] = i;
            i += 1;
        }
        Self { physical }
    }

    /// Build a table from explicit `(logical, physical)` assignments.
    ///
    /// Buttons without an assignment stay on their default position.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::DuplicatePhysicalIndex`] if the completed table
    /// sends two logical buttons to one physical position, and
    /// [`ProfileError::IndexOutOfRange`] for a position beyond the button count.
    pub fn from_assignments(
        assignments: impl IntoIterator<Item = (LogicalButton, usize)>,
    ) -> ProfileResult<Self> {
        let mut table = Self::identity();
        for (logical, physical) in assignments {
            if physical >= BUTTON_COUNT {
                return Err(ProfileError::IndexOutOfRange {
                    index: i64::try_from(physical).map_or(i64::MAX, |i| i.saturating_add(1)),
                    max: BUTTON_COUNT,
                    context: format!("remap entry for {logical}"),
                });
            }
            if let Some(slot) = table.physical.get_mut(logical.index()) {
                *slot = physical;
            }
        }
        table.check_permutation()?;
        Ok(table)
    }

    fn check_permutation(&self) -> ProfileResult<()> {
        let mut owner: [Option<LogicalButton>; BUTTON_COUNT] = [None; BUTTON_COUNT];
        for (logical, physical) in LogicalButton::ALL.iter().zip(self.physical) {
            match owner.get_mut(physical) {
                Some(Some(first)) => {
                    return Err(ProfileError::DuplicatePhysicalIndex {
                        index: physical.saturating_add(1),
                        first: *first,
                        second: *logical,
                    });
                }
                Some(slot) => *slot = Some(*logical),
                None => {}
            }
        }
        Ok(())
    }

    /// 0-based physical position driving `logical`.
    pub fn physical_index(&self, logical: LogicalButton) -> usize {
        self.physical
            .get(logical.index())
            .copied()
            .unwrap_or(logical.index())
    }

    /// True when the physical position assigned to `logical` is held.
    #[inline]
    pub fn is_pressed(&self, physical: &InputState, logical: LogicalButton) -> bool {
        physical.is_index_pressed(self.physical_index(logical))
    }

    /// Translate a physical snapshot into a logical one.
    pub fn to_logical(&self, physical: &InputState) -> InputState {
        LogicalButton::ALL
            .iter()
            .copied()
            .filter(|logical| self.is_pressed(physical, *logical))
            .collect()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Buttons moved off their default position, with their new 0-based position.
    pub fn remapped(&self) -> impl Iterator<Item = (LogicalButton, usize)> + '_ {
        LogicalButton::ALL
            .iter()
            .copied()
            .zip(self.physical)
            .filter(|(logical, physical)| logical.index() != *physical)
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicalButton::*;

    #[test]
    fn test_identity_passes_through() {
        let table = RemapTable::identity();
        let physical = InputState::from_buttons(&[A, ModX, Left]);
        assert_eq!(table.to_logical(&physical), physical);
        assert!(table.is_identity());
        assert_eq!(table.remapped().count(), 0);
    }

    #[test]
    fn test_swap_a_and_b() -> ProfileResult<()> {
        let table = RemapTable::from_assignments([(A, B.index()), (B, A.index())])?;

        // Pressing the physical B position drives logical A.
        let logical = table.to_logical(&InputState::from_buttons(&[B]));
        assert!(logical.is_pressed(A));
        assert!(!logical.is_pressed(B));
        assert_eq!(table.remapped().count(), 2);
        Ok(())
    }

    #[test]
    fn test_one_sided_move_is_rejected() {
        // Moving A onto B's position without moving B leaves two owners.
        let result = RemapTable::from_assignments([(A, B.index())]);
        assert_eq!(
            result,
            Err(ProfileError::DuplicatePhysicalIndex {
                index: B.index() + 1,
                first: B,
                second: A,
            })
        );
    }

    #[test]
    fn test_out_of_range_position() {
        let result = RemapTable::from_assignments([(A, BUTTON_COUNT)]);
        assert!(matches!(
            result,
            Err(ProfileError::IndexOutOfRange { index: 21, .. })
        ));
    }
}
