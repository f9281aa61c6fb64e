//! `framectl check`

use crate::commands::CheckArgs;
use crate::error::CliError;
use crate::output;
use anyhow::{Context, Result};
use openframe_profile::Profile;

pub fn execute(args: &CheckArgs, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(&args.profile)
        .with_context(|| format!("Failed to read profile {}", args.profile.display()))?;
    let profile = Profile::from_json(&text).map_err(CliError::from)?;

    if json {
        let summary = serde_json::json!({
            "success": true,
            "profile": output::profile_summary(&profile),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_profile_human(&profile);
    }
    Ok(())
}
