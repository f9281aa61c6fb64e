//! Resolution policies.

use crate::SocdError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How a pair resolves when both of its directions are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SocdPolicy {
    /// Both held: neither is active.
    Neutral,
    /// Both held: the most recently pressed direction wins. Simultaneous
    /// presses fall back to neutral.
    #[default]
    SecondInputPriority,
    /// Like [`SecondInputPriority`](Self::SecondInputPriority), but a direction
    /// that already lost (or already won) during the other direction's hold
    /// cannot take priority back by being released and pressed again.
    SecondInputPriorityNoReactivation,
    /// Both held: whichever was pressed first keeps priority until released.
    FirstInputPriority,
}

impl SocdPolicy {
    pub const ALL: [SocdPolicy; 4] = [
        SocdPolicy::Neutral,
        SocdPolicy::SecondInputPriority,
        SocdPolicy::SecondInputPriorityNoReactivation,
        SocdPolicy::FirstInputPriority,
    ];

    /// Tag used in profile documents.
    pub const fn tag(self) -> &'static str {
        match self {
            SocdPolicy::Neutral => "neutral",
            SocdPolicy::SecondInputPriority => "2IP",
            SocdPolicy::SecondInputPriorityNoReactivation => "2IP_NO_REAC",
            SocdPolicy::FirstInputPriority => "FIRST_INPUT",
        }
    }
}

impl fmt::Display for SocdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SocdPolicy {
    type Err = SocdError;

    /// Case-insensitive; separators (`_`, `-`, spaces) are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "neutral" => Ok(SocdPolicy::Neutral),
            "2ip" | "secondinput" | "secondinputpriority" => Ok(SocdPolicy::SecondInputPriority),
            "2ipnoreac" | "2ipnoreactivation" | "secondinputprioritynoreactivation" => {
                Ok(SocdPolicy::SecondInputPriorityNoReactivation)
            }
            "firstinput" | "firstinputpriority" => Ok(SocdPolicy::FirstInputPriority),
            _ => Err(SocdError::UnknownPolicy(s.to_string())),
        }
    }
}

impl Serialize for SocdPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for SocdPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
