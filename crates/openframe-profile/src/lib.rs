//! Profile documents for OpenFrame controller modes.
//!
//! A profile document is the user-editable JSON file that customizes a
//! controller mode. It carries identification metadata and up to two payloads:
//!
//! - a **remap table**: logical button to physical button, so users can swap
//!   physical buttons without touching game logic
//! - an **input map**: ordered rules of the form "when these buttons are all
//!   held, set these output fields", evaluated last-match-wins per field
//!
//! Documents are parsed into the raw [`ProfileDocument`] model, then validated
//! into an immutable [`Profile`]. Validation is all-or-nothing: a document with
//! one bad index is rejected as a whole. Callers that must keep running use
//! [`load_or_builtin`], which falls back to [`Profile::builtin`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod profile;
pub mod remap;
pub mod rules;
pub mod types;
pub mod validation;

pub use profile::{Profile, ProfileLoad, ProfileMetadata, SocdOverrides, load_or_builtin};
pub use remap::RemapTable;
pub use rules::{RemapRule, RuleSet};
pub use types::{ProfileDocument, RuleDocument};
pub use validation::validate_document;

use openframe_state::{FieldKind, LogicalButton};
use thiserror::Error;

/// Current profile schema version.
/// Documents without a `schemaVersion` field are read as this version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Errors raised while loading a profile document.
///
/// Every variant is a configuration error: the document is refused as a whole
/// and nothing from it is applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Malformed profile document: {0}")]
    Malformed(String),

    #[error("Profile document has neither a remap table nor an input map")]
    MissingPayload,

    #[error("Button index {index} in {context} is out of range 1..={max}")]
    IndexOutOfRange {
        index: i64,
        max: usize,
        context: String,
    },

    #[error("Unknown button {0:?} in remap table")]
    UnknownButton(String),

    #[error("Unknown output field {field:?} in rule {rule}")]
    UnknownOutputField { field: String, rule: usize },

    #[error("Output field {field} in rule {rule} expects {expected}, got {value}")]
    InvalidFieldValue {
        field: &'static str,
        rule: usize,
        expected: FieldKind,
        value: String,
    },

    #[error("Physical button {index} is assigned to both {first} and {second}")]
    DuplicatePhysicalIndex {
        index: usize,
        first: LogicalButton,
        second: LogicalButton,
    },

    #[error("Declared button count {count} is outside 1..={max}")]
    InvalidButtonCount { count: i64, max: usize },

    #[error("Unsupported schema version {0}: maximum supported is {1}")]
    UnsupportedVersion(u32, u32),
}

pub type ProfileResult<T> = Result<T, ProfileError>;

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Malformed(e.to_string())
    }
}
