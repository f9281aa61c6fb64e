//! `framectl replay`

use crate::commands::{ReplayArgs, build_mode};
use crate::config::{Overrides, RunConfig};
use crate::output::JsonLinesSink;
use crate::script::{ScriptedInput, parse_script};
use anyhow::{Context, Result};
use openframe_backend::CommunicationBackend;
use openframe_scheduler::FrameScheduler;
use tracing::info;

pub fn execute(args: &ReplayArgs) -> Result<()> {
    let config = RunConfig::load(args.config.as_deref())?.apply(Overrides {
        mode: args.mode.mode,
        socd: args.mode.socd,
        profile: args.mode.profile.clone(),
        frame_rate_hz: args.rate,
        script_best_effort: args.best_effort,
    });

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script = ScriptedInput::new(parse_script(&text)?, config.script_best_effort);
    let frames = args
        .frames
        .unwrap_or_else(|| u64::try_from(script.len()).unwrap_or(u64::MAX));

    let mode = build_mode(&config)?;
    let stdout = std::io::stdout();
    let mut backend = CommunicationBackend::new(mode, JsonLinesSink::new(stdout.lock()))
        .with_source(Box::new(script));

    info!(
        frames,
        rate_hz = config.frame_rate_hz,
        paced = !args.no_pace,
        "Replaying input script"
    );

    if args.no_pace {
        for _ in 0..frames {
            let _outcome = backend.run_frame();
        }
    } else {
        let mut scheduler = FrameScheduler::from_hz(config.frame_rate_hz)
            .map_err(crate::error::CliError::from)?;
        backend.run_for(&mut scheduler, frames);
    }

    let stats = backend.stats();
    info!(
        frames = stats.frames,
        fresh = stats.fresh_frames,
        scan_failures = stats.scan_failures,
        resent = stats.resent_frames,
        send_failures = stats.send_failures,
        skipped = stats.skipped_frames,
        "Replay finished"
    );
    Ok(())
}
