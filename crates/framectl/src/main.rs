//! framectl - OpenFrame host-side harness
//!
//! Validates profile documents, resolves one-off button combinations and
//! replays scripted input through the full frame loop. Reports go to stdout,
//! logs to stderr.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod error;
mod output;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CheckArgs, ReplayArgs, ResolveArgs};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "framectl")]
#[command(about = "OpenFrame host harness - check profiles, resolve inputs, replay scripts")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a profile document and print its summary
    Check(CheckArgs),

    /// Run one frame with the given logical buttons held and print the report
    Resolve(ResolveArgs),

    /// Drive the frame loop from a JSON-lines input script
    Replay(ReplayArgs),
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => commands::check::execute(args, cli.json),
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Replay(args) => commands::replay::execute(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}
