//! Run configuration for `framectl replay` and `framectl resolve`.
//!
//! Values come from an optional YAML file; command-line flags override them.
//!
//! ```yaml
//! mode: ultimate_r4
//! socd: 2IP
//! profile: profiles/melee.json
//! frame_rate_hz: 60
//! script_best_effort: false
//! ```

use crate::error::CliError;
use openframe_mode::ModeKind;
use openframe_scheduler::DEFAULT_FRAME_RATE_HZ;
use openframe_socd::SocdPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub mode: ModeKind,
    pub socd: SocdPolicy,
    pub profile: Option<PathBuf>,
    pub frame_rate_hz: u32,
    /// Treat failed script lines as a best-effort source: keep the previous
    /// line's buttons instead of failing the scan.
    pub script_best_effort: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: ModeKind::default(),
            socd: SocdPolicy::default(),
            profile: None,
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            script_best_effort: false,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mode: Option<ModeKind>,
    pub socd: Option<SocdPolicy>,
    pub profile: Option<PathBuf>,
    pub frame_rate_hz: Option<u32>,
    pub script_best_effort: bool,
}

impl RunConfig {
    pub fn from_yaml(text: &str) -> Result<Self, CliError> {
        // An empty file is an empty mapping, not an error.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read `path`, or the defaults when no file is given.
    ///
    /// A relative `profile` path in the file is resolved against the file's
    /// directory.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&text)?;
        if let (Some(profile), Some(dir)) = (config.profile.as_ref(), path.parent())
            && profile.is_relative()
        {
            config.profile = Some(dir.join(profile));
        }
        Ok(config)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(socd) = overrides.socd {
            self.socd = socd;
        }
        if overrides.profile.is_some() {
            self.profile = overrides.profile;
        }
        if let Some(hz) = overrides.frame_rate_hz {
            self.frame_rate_hz = hz;
        }
        self.script_best_effort |= overrides.script_best_effort;
        self
    }
}
