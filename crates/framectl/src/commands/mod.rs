//! Command definitions and shared helpers.

pub mod check;
pub mod replay;
pub mod resolve;

use crate::config::RunConfig;
use anyhow::{Context, Result};
use clap::Args;
use openframe_mode::{ControllerMode, ModeKind};
use openframe_profile::{Profile, load_or_builtin};
use openframe_socd::SocdPolicy;
use openframe_state::LogicalButton;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Profile document to validate
    pub profile: PathBuf,
}

/// Flags shared by commands that build a controller mode.
#[derive(Args, Debug, Default)]
pub struct ModeArgs {
    /// Profile document (falls back to the built-in profile if rejected)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Controller mode: ultimate_r4 or profile_only
    #[arg(short, long)]
    pub mode: Option<ModeKind>,

    /// SOCD policy: neutral, 2IP, 2IP_NO_REAC or FIRST_INPUT
    #[arg(short, long)]
    pub socd: Option<SocdPolicy>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub mode: ModeArgs,

    /// Logical buttons held for the frame
    #[arg(required = true)]
    pub buttons: Vec<LogicalButton>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// YAML run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Frames to run (defaults to the script length)
    #[arg(short = 'n', long)]
    pub frames: Option<u64>,

    /// Frame rate in Hz
    #[arg(long)]
    pub rate: Option<u32>,

    /// Run frames back to back instead of at the frame rate
    #[arg(long)]
    pub no_pace: bool,

    /// Keep the previous buttons on scripted failures instead of re-sending
    #[arg(long)]
    pub best_effort: bool,

    /// JSON-lines input script
    pub script: PathBuf,
}

/// Build the controller mode described by `config`.
///
/// A rejected profile document is not fatal: the built-in profile is used
/// and the reason is logged.
pub fn build_mode(config: &RunConfig) -> Result<ControllerMode> {
    let profile = match &config.profile {
        None => Profile::builtin(),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile {}", path.display()))?;
            let load = load_or_builtin(&text);
            if let Some(reason) = &load.fallback {
                warn!(
                    path = %path.display(),
                    %reason,
                    "Using the built-in profile instead"
                );
            }
            load.profile
        }
    };
    Ok(ControllerMode::new(config.mode, config.socd, profile))
}
