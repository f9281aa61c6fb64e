//! Document validation.

use crate::profile::{Profile, ProfileMetadata, SocdOverrides};
use crate::remap::RemapTable;
use crate::rules::{RemapRule, RuleSet};
use crate::types::{ProfileDocument, RuleDocument};
use crate::{CURRENT_SCHEMA_VERSION, ProfileError, ProfileResult};
use openframe_state::{BUTTON_COUNT, FieldKind, FieldValue, InputState, LogicalButton, OutputField};
use serde_json::Value;

const UNNAMED_PROFILE: &str = "Unnamed profile";

/// Validate a raw document into a [`Profile`].
///
/// # Errors
///
/// Returns the first problem found. Checks, in order: schema version,
/// declared button count, presence of a payload, the remap table, then every
/// rule in document order.
pub fn validate_document(doc: &ProfileDocument) -> ProfileResult<Profile> {
    let schema_version = doc.schema_version.unwrap_or(CURRENT_SCHEMA_VERSION);
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(ProfileError::UnsupportedVersion(
            schema_version,
            CURRENT_SCHEMA_VERSION,
        ));
    }

    let button_count = validate_button_count(doc.button_count)?;

    if doc.remap.is_none() && doc.input_map.is_none() {
        return Err(ProfileError::MissingPayload);
    }

    let remap = match &doc.remap {
        Some(entries) => {
            let mut assignments = Vec::with_capacity(entries.len());
            for (key, physical) in entries {
                let logical = parse_logical_key(key, button_count)?;
                let context = format!("remap entry for {logical}");
                let physical = one_based(*physical, button_count, &context)?;
                assignments.push((logical, physical));
            }
            RemapTable::from_assignments(assignments)?
        }
        None => RemapTable::identity(),
    };

    let rules = match &doc.input_map {
        Some(rules) => RuleSet::new(
            rules
                .iter()
                .enumerate()
                .map(|(i, rule)| validate_rule(rule, i.saturating_add(1), button_count))
                .collect::<ProfileResult<Vec<_>>>()?,
        ),
        None => RuleSet::default(),
    };

    Ok(Profile {
        metadata: ProfileMetadata {
            name: doc
                .name
                .clone()
                .unwrap_or_else(|| UNNAMED_PROFILE.to_string()),
            authors: doc.authors.clone(),
            source: doc.source.clone(),
            profile_version: doc.profile_version.clone(),
            schema_version,
        },
        socd: SocdOverrides {
            horizontal: doc.horizontal_socd,
            vertical: doc.vertical_socd,
        },
        button_count,
        remap,
        rules,
    })
}

fn validate_button_count(declared: Option<i64>) -> ProfileResult<usize> {
    match declared {
        None => Ok(BUTTON_COUNT),
        Some(count) => usize::try_from(count)
            .ok()
            .filter(|c| (1..=BUTTON_COUNT).contains(c))
            .ok_or(ProfileError::InvalidButtonCount {
                count,
                max: BUTTON_COUNT,
            }),
    }
}

/// Convert a 1-based document index to a 0-based position below `max`.
fn one_based(index: i64, max: usize, context: &str) -> ProfileResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| (1..=max).contains(i))
        .map(|i| i.saturating_sub(1))
        .ok_or_else(|| ProfileError::IndexOutOfRange {
            index,
            max,
            context: context.to_string(),
        })
}

/// Remap keys are a logical button name or its 1-based default index.
fn parse_logical_key(key: &str, button_count: usize) -> ProfileResult<LogicalButton> {
    if let Ok(index) = key.trim().parse::<i64>() {
        let position = one_based(index, button_count, "remap table key")?;
        return LogicalButton::from_index(position)
            .map_err(|_| ProfileError::UnknownButton(key.to_string()));
    }
    key.parse::<LogicalButton>()
        .map_err(|_| ProfileError::UnknownButton(key.to_string()))
}

fn validate_rule(rule: &RuleDocument, number: usize, button_count: usize) -> ProfileResult<RemapRule> {
    let context = format!("rule {number}");
    let mut required = InputState::new();
    for index in &rule.buttons {
        let position = one_based(*index, button_count, &context)?;
        let button = LogicalButton::from_index(position).map_err(|_| {
            ProfileError::IndexOutOfRange {
                index: *index,
                max: button_count,
                context: context.clone(),
            }
        })?;
        required.press(button);
    }

    let mut validated = RemapRule::new(required);
    for (name, raw) in &rule.output {
        let field: OutputField = name
            .parse()
            .map_err(|_| ProfileError::UnknownOutputField {
                field: name.clone(),
                rule: number,
            })?;
        let invalid = || ProfileError::InvalidFieldValue {
            field: field.name(),
            rule: number,
            expected: field.kind(),
            value: raw.to_string(),
        };
        let value = field_value(field, raw).ok_or_else(invalid)?;
        validated.set(field, value).map_err(|_| invalid())?;
    }

    Ok(validated)
}

fn field_value(field: OutputField, raw: &Value) -> Option<FieldValue> {
    match field.kind() {
        FieldKind::Digital => raw.as_bool().map(FieldValue::Digital),
        FieldKind::Analog => raw
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .map(FieldValue::Analog),
    }
}
