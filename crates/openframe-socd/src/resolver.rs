//! Stateful SOCD resolver.

use crate::pair::SocdPair;
use crate::policy::SocdPolicy;
use crate::{SocdError, SocdResult};
use openframe_state::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winner {
    Dir1,
    Dir2,
}

/// Per-pair press history.
///
/// `prev_*` hold the raw (unresolved) state from the previous call so press
/// edges can be detected. The `*_seen_during_*` flags back the no-reactivation
/// policy: once both directions have been held together, neither can regain
/// priority until the direction it is seen "during" is released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PairMemory {
    prev_dir1: bool,
    prev_dir2: bool,
    winner: Option<Winner>,
    dir2_seen_during_dir1: bool,
    dir1_seen_during_dir2: bool,
}

impl PairMemory {
    fn step(&mut self, policy: SocdPolicy, dir1: bool, dir2: bool) -> (bool, bool) {
        let rose1 = dir1 && !self.prev_dir1;
        let rose2 = dir2 && !self.prev_dir2;

        self.winner = match (dir1, dir2) {
            (false, false) => None,
            (true, false) => Some(Winner::Dir1),
            (false, true) => Some(Winner::Dir2),
            (true, true) => self.both_held(policy, rose1, rose2),
        };

        if dir1 && dir2 {
            self.dir2_seen_during_dir1 = true;
            self.dir1_seen_during_dir2 = true;
        }
        if !dir1 {
            self.dir2_seen_during_dir1 = false;
        }
        if !dir2 {
            self.dir1_seen_during_dir2 = false;
        }
        self.prev_dir1 = dir1;
        self.prev_dir2 = dir2;

        if dir1 && dir2 && policy == SocdPolicy::Neutral {
            return (false, false);
        }
        match self.winner {
            Some(Winner::Dir1) => (true, false),
            Some(Winner::Dir2) => (false, true),
            None => (false, false),
        }
    }

    fn both_held(&self, policy: SocdPolicy, rose1: bool, rose2: bool) -> Option<Winner> {
        match (rose1, rose2) {
            // Indistinguishable press order.
            (true, true) => None,
            (false, false) => self.winner,
            (true, false) => match policy {
                SocdPolicy::Neutral => None,
                SocdPolicy::SecondInputPriority => Some(Winner::Dir1),
                SocdPolicy::SecondInputPriorityNoReactivation if !self.dir1_seen_during_dir2 => {
                    Some(Winner::Dir1)
                }
                SocdPolicy::SecondInputPriorityNoReactivation
                | SocdPolicy::FirstInputPriority => self.winner,
            },
            (false, true) => match policy {
                SocdPolicy::Neutral => None,
                SocdPolicy::SecondInputPriority => Some(Winner::Dir2),
                SocdPolicy::SecondInputPriorityNoReactivation if !self.dir2_seen_during_dir1 => {
                    Some(Winner::Dir2)
                }
                SocdPolicy::SecondInputPriorityNoReactivation
                | SocdPolicy::FirstInputPriority => self.winner,
            },
        }
    }
}

/// Resolves opposed-direction conflicts for a fixed set of pairs.
///
/// Owns the per-pair memory for the lifetime of the controller mode that
/// holds it. Pairs are independent of each other.
#[derive(Debug, Clone)]
pub struct SocdResolver {
    pairs: Vec<SocdPair>,
    memory: Vec<PairMemory>,
}

impl SocdResolver {
    /// Build a resolver for `pairs`.
    ///
    /// # Errors
    ///
    /// - [`SocdError::DegeneratePair`] if a pair opposes a button with itself.
    /// - [`SocdError::OverlappingPairs`] if a button belongs to two pairs.
    pub fn new(pairs: impl IntoIterator<Item = SocdPair>) -> SocdResult<Self> {
        let pairs: Vec<SocdPair> = pairs.into_iter().collect();
        let mut claimed = InputState::new();

        for pair in &pairs {
            if pair.dir1 == pair.dir2 {
                return Err(SocdError::DegeneratePair(pair.dir1));
            }
            for button in [pair.dir1, pair.dir2] {
                if claimed.is_pressed(button) {
                    return Err(SocdError::OverlappingPairs(button));
                }
                claimed.press(button);
            }
        }

        let memory = vec![PairMemory::default(); pairs.len()];
        Ok(Self { pairs, memory })
    }

    /// Resolver over the four stick axes of the reference layout.
    ///
    /// The standard pairs are disjoint, so this cannot fail.
    pub fn standard(horizontal: SocdPolicy, vertical: SocdPolicy) -> Self {
        let pairs = SocdPair::standard_split(horizontal, vertical).to_vec();
        let memory = vec![PairMemory::default(); pairs.len()];
        Self { pairs, memory }
    }

    pub fn pairs(&self) -> &[SocdPair] {
        &self.pairs
    }

    /// Resolve `inputs` against every pair and return the corrected snapshot.
    ///
    /// The input is left untouched. Buttons outside every pair pass through.
    #[must_use]
    pub fn resolve(&mut self, inputs: &InputState) -> InputState {
        let mut resolved = *inputs;
        for (pair, memory) in self.pairs.iter().zip(self.memory.iter_mut()) {
            let (dir1, dir2) = memory.step(
                pair.policy,
                inputs.is_pressed(pair.dir1),
                inputs.is_pressed(pair.dir2),
            );
            resolved.set(pair.dir1, dir1);
            resolved.set(pair.dir2, dir2);
        }
        resolved
    }

    /// Forget all press history.
    pub fn reset(&mut self) {
        self.memory.fill(PairMemory::default());
    }
}
