//! Input sources.

use crate::error::ScanResult;
use openframe_state::InputState;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// How often a source needs to be scanned.
///
/// Filtered scans visit only the sources of one class, so a fast digital
/// matrix can be read every frame while slower peripherals are read less
/// often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputScanSpeed {
    #[default]
    Fast,
    Medium,
    Slow,
}

impl fmt::Display for InputScanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
        })
    }
}

/// A producer of raw button readings.
///
/// Readings are indexed by physical button. Hardware access that blocks (bus
/// transfers, debouncing) belongs behind this trait: by the time
/// `update_inputs` returns, the reading is complete.
pub trait InputSource: Send {
    fn name(&self) -> &str;

    fn scan_speed(&self) -> InputScanSpeed;

    /// Write this source's fresh reading into `inputs`.
    ///
    /// `inputs` starts empty for every call. Only buttons this source owns
    /// should be set.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`](crate::ScanError) if no complete reading is
    /// available this frame.
    fn update_inputs(&mut self, inputs: &mut InputState) -> ScanResult<()>;

    /// A best-effort source that fails keeps its previous reading instead of
    /// failing the whole scan.
    fn is_best_effort(&self) -> bool {
        false
    }

    /// Called instead of `update_inputs` when a filtered scan skips this
    /// source. A skipped source contributes nothing unless it writes its
    /// still-valid fields here.
    fn reaffirm(&self, _inputs: &mut InputState) {}
}

/// Shared raw snapshot written by whatever services the hardware.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    bits: Arc<AtomicU32>,
}

impl SnapshotHandle {
    pub fn store(&self, raw: InputState) {
        self.bits.store(raw.bits(), Ordering::Release);
    }

    pub fn load(&self) -> InputState {
        InputState::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Source reading a snapshot published through a [`SnapshotHandle`].
///
/// The snapshot is always complete, so this source never fails and can
/// reaffirm itself cheaply during filtered scans.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    name: String,
    speed: InputScanSpeed,
    handle: SnapshotHandle,
}

impl SnapshotSource {
    pub fn new(name: impl Into<String>, speed: InputScanSpeed) -> Self {
        Self {
            name: name.into(),
            speed,
            handle: SnapshotHandle::default(),
        }
    }

    /// Writer side of the snapshot.
    pub fn handle(&self) -> SnapshotHandle {
        self.handle.clone()
    }
}

impl InputSource for SnapshotSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan_speed(&self) -> InputScanSpeed {
        self.speed
    }

    fn update_inputs(&mut self, inputs: &mut InputState) -> ScanResult<()> {
        *inputs = inputs.union(self.handle.load());
        Ok(())
    }

    fn reaffirm(&self, inputs: &mut InputState) {
        *inputs = inputs.union(self.handle.load());
    }
}
