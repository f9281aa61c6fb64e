//! `framectl resolve`

use crate::commands::{ResolveArgs, build_mode};
use crate::config::{Overrides, RunConfig};
use anyhow::Result;
use openframe_state::{InputState, LogicalButton};

pub fn execute(args: &ResolveArgs) -> Result<()> {
    let config = RunConfig::default().apply(Overrides {
        mode: args.mode.mode,
        socd: args.mode.socd,
        profile: args.mode.profile.clone(),
        ..Overrides::default()
    });
    let mut mode = build_mode(&config)?;

    // Buttons are named logically; press whichever physical buttons the
    // profile's remap puts them on.
    let mut raw = InputState::new();
    for logical in &args.buttons {
        let physical = mode.profile().remap.physical_index(*logical);
        raw.press(LogicalButton::from_index(physical)?);
    }

    let report = mode.update_outputs(&raw);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
