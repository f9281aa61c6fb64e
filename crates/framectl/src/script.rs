//! Scripted input for `framectl replay`.
//!
//! A script is JSON lines, one frame per line. Each line is either an array
//! of held physical buttons or `{"fail": true}` to simulate a scan failure.
//! Buttons are given by the name of their default position (`"a"`,
//! `"mod_x"`) or by 1-based physical index. Blank lines and lines starting
//! with `#` are ignored.
//!
//! ```text
//! ["left"]
//! ["left", "mod_x"]
//! {"fail": true}
//! [1, 4]
//! ```

use crate::error::CliError;
use openframe_backend::{InputScanSpeed, InputSource, ScanError, ScanResult};
use openframe_state::{BUTTON_COUNT, InputState, LogicalButton};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFrame {
    Held(InputState),
    Fail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLine {
    Held(Vec<RawButton>),
    Control(Control),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Control {
    fail: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawButton {
    Index(i64),
    Name(String),
}

fn physical_button(raw: &RawButton) -> Result<LogicalButton, String> {
    match raw {
        RawButton::Name(name) => name.parse().map_err(|e| format!("{e}")),
        RawButton::Index(index) => usize::try_from(*index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| LogicalButton::from_index(i).ok())
            .ok_or_else(|| format!("button index {index} is out of range 1..={BUTTON_COUNT}")),
    }
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptFrame>, CliError> {
    let mut frames = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let invalid = |reason: String| CliError::InvalidScript {
            line: number.saturating_add(1),
            reason,
        };

        let raw: RawLine = serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        let frame = match raw {
            RawLine::Control(Control { fail: true }) => ScriptFrame::Fail,
            RawLine::Control(Control { fail: false }) => ScriptFrame::Held(InputState::new()),
            RawLine::Held(buttons) => {
                let mut held = InputState::new();
                for button in &buttons {
                    held.press(physical_button(button).map_err(invalid)?);
                }
                ScriptFrame::Held(held)
            }
        };
        frames.push(frame);
    }
    Ok(frames)
}

/// Input source replaying a parsed script. Once the script runs out, every
/// button reads as released.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frames: Vec<ScriptFrame>,
    cursor: usize,
    best_effort: bool,
}

impl ScriptedInput {
    pub fn new(frames: Vec<ScriptFrame>, best_effort: bool) -> Self {
        Self {
            frames,
            cursor: 0,
            best_effort,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn name(&self) -> &str {
        "script"
    }

    fn scan_speed(&self) -> InputScanSpeed {
        InputScanSpeed::Fast
    }

    fn update_inputs(&mut self, inputs: &mut InputState) -> ScanResult<()> {
        let frame = self.frames.get(self.cursor).copied();
        self.cursor = self.cursor.saturating_add(1);
        match frame {
            Some(ScriptFrame::Held(held)) => {
                *inputs = inputs.union(held);
                Ok(())
            }
            Some(ScriptFrame::Fail) => Err(ScanError::HardwareFault {
                source_name: self.name().to_owned(),
                detail: format!("scripted failure at frame {}", self.cursor),
            }),
            None => {
                if self.cursor == self.frames.len().saturating_add(1) {
                    debug!(frames = self.frames.len(), "Script exhausted, releasing all buttons");
                }
                Ok(())
            }
        }
    }

    fn is_best_effort(&self) -> bool {
        self.best_effort
    }
}
