//! Output formatting for framectl

use colored::Colorize;
use openframe_backend::{ReportSink, TransportError, TransportResult};
use openframe_profile::Profile;
use openframe_state::OutputState;
use serde::Serialize;
use serde_json::json;
use std::io::Write;

#[derive(Serialize)]
struct ReportLine<'a> {
    frame: u64,
    #[serde(flatten)]
    report: &'a OutputState,
}

/// Report sink writing one JSON object per frame.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    frame: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frame: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn send_report(&mut self, report: &OutputState) -> TransportResult<()> {
        let line = ReportLine {
            frame: self.frame,
            report,
        };
        serde_json::to_writer(&mut self.writer, &line)
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.frame = self.frame.saturating_add(1);
        Ok(())
    }
}

/// Summary of a validated profile for `framectl check`.
pub fn profile_summary(profile: &Profile) -> serde_json::Value {
    let remapped: serde_json::Map<String, serde_json::Value> = profile
        .remap
        .remapped()
        .map(|(logical, physical)| (logical.name().to_string(), json!(physical.saturating_add(1))))
        .collect();
    json!({
        "name": profile.metadata.name,
        "authors": profile.metadata.authors,
        "source": profile.metadata.source,
        "profileVersion": profile.metadata.profile_version,
        "schemaVersion": profile.metadata.schema_version,
        "buttonCount": profile.button_count,
        "rules": profile.rules.len(),
        "remapped": remapped,
        "horizontalSocd": profile.socd.horizontal.map(|p| p.tag()),
        "verticalSocd": profile.socd.vertical.map(|p| p.tag()),
    })
}

pub fn print_profile_human(profile: &Profile) {
    println!("{} {}", "Profile:".bold(), profile.metadata.name);
    if !profile.metadata.authors.is_empty() {
        println!("  Authors: {}", profile.metadata.authors.join(", "));
    }
    if let Some(version) = &profile.metadata.profile_version {
        println!("  Version: {version}");
    }
    println!("  Buttons: {}", profile.button_count);
    println!("  Rules:   {}", profile.rules.len());

    let remapped: Vec<String> = profile
        .remap
        .remapped()
        .map(|(logical, physical)| format!("{logical} -> {}", physical.saturating_add(1)))
        .collect();
    if remapped.is_empty() {
        println!("  Remap:   {}", "identity".dimmed());
    } else {
        println!("  Remap:   {}", remapped.join(", "));
    }

    let tag = |policy: Option<openframe_socd::SocdPolicy>| {
        policy.map_or_else(|| "mode default".dimmed().to_string(), |p| p.tag().to_string())
    };
    println!(
        "  SOCD:    horizontal {}, vertical {}",
        tag(profile.socd.horizontal),
        tag(profile.socd.vertical)
    );
    println!("{}", "Valid".green().bold());
}

pub fn print_error_json(error: &anyhow::Error) {
    let error_json = json!({
        "success": false,
        "error": { "message": format!("{error:#}") }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

pub fn print_error_human(error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}
