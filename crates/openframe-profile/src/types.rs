//! Raw profile document model, as it appears on disk.

use openframe_socd::SocdPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A profile document before validation.
///
/// Every metadata field is optional. Indices are kept signed and unchecked
/// here so validation can report the offending value instead of a serde
/// type error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_version: Option<String>,

    /// Schema format version for migration tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    /// Number of physical buttons the document was written for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_socd: Option<SocdPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_socd: Option<SocdPolicy>,

    /// Logical button (name or 1-based index) to 1-based physical index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remap: Option<BTreeMap<String, i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_map: Option<Vec<RuleDocument>>,
}

/// One `inputMap` entry: required buttons (1-based) and the fields to set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub buttons: Vec<i64>,

    #[serde(default)]
    pub output: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_parses() -> Result<(), Box<dyn std::error::Error>> {
        let doc: ProfileDocument = serde_json::from_str(r#"{ "inputMap": [] }"#)?;
        assert_eq!(doc.name, None);
        assert!(doc.authors.is_empty());
        assert_eq!(doc.input_map, Some(Vec::new()));
        Ok(())
    }

    #[test]
    fn test_unknown_top_level_fields_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let doc: ProfileDocument =
            serde_json::from_str(r#"{ "name": "x", "comment": "ignored", "remap": {} }"#)?;
        assert_eq!(doc.name.as_deref(), Some("x"));
        Ok(())
    }

    #[test]
    fn test_socd_tags_parse() -> Result<(), Box<dyn std::error::Error>> {
        let doc: ProfileDocument = serde_json::from_str(
            r#"{ "horizontalSocd": "2IP", "verticalSocd": "neutral", "inputMap": [] }"#,
        )?;
        assert_eq!(doc.horizontal_socd, Some(SocdPolicy::SecondInputPriority));
        assert_eq!(doc.vertical_socd, Some(SocdPolicy::Neutral));
        Ok(())
    }

    #[test]
    fn test_rule_output_keeps_raw_values() -> Result<(), Box<dyn std::error::Error>> {
        let rule: RuleDocument =
            serde_json::from_str(r#"{ "buttons": [2, 5], "output": { "leftStickX": 75 } }"#)?;
        assert_eq!(rule.buttons, vec![2, 5]);
        assert_eq!(
            rule.output.get("leftStickX"),
            Some(&serde_json::Value::from(75))
        );
        Ok(())
    }
}
