//! Validated, immutable profiles.

use crate::remap::RemapTable;
use crate::rules::RuleSet;
use crate::types::ProfileDocument;
use crate::validation::validate_document;
use crate::{CURRENT_SCHEMA_VERSION, ProfileError, ProfileResult};
use openframe_socd::SocdPolicy;
use openframe_state::BUTTON_COUNT;
use tracing::{info, warn};

/// Name reported by [`Profile::builtin`].
pub const BUILTIN_PROFILE_NAME: &str = "Built-in default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub name: String,
    pub authors: Vec<String>,
    pub source: Option<String>,
    pub profile_version: Option<String>,
    pub schema_version: u32,
}

impl Default for ProfileMetadata {
    fn default() -> Self {
        Self {
            name: BUILTIN_PROFILE_NAME.to_string(),
            authors: Vec::new(),
            source: None,
            profile_version: None,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

/// Per-axis-group SOCD policies requested by a document.
///
/// `None` keeps the policy the controller mode was constructed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocdOverrides {
    pub horizontal: Option<SocdPolicy>,
    pub vertical: Option<SocdPolicy>,
}

impl SocdOverrides {
    /// Resolve against the mode's default policy: `(horizontal, vertical)`.
    pub fn resolve(&self, default: SocdPolicy) -> (SocdPolicy, SocdPolicy) {
        (
            self.horizontal.unwrap_or(default),
            self.vertical.unwrap_or(default),
        )
    }
}

/// A loaded profile. Immutable once built; re-profiling means building a
/// new controller mode from a new `Profile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub metadata: ProfileMetadata,
    pub socd: SocdOverrides,
    pub button_count: usize,
    pub remap: RemapTable,
    pub rules: RuleSet,
}

impl Profile {
    /// The profile used when no valid document is available: identity remap,
    /// no rules, no SOCD overrides (the mode's own policy applies).
    pub fn builtin() -> Self {
        Self {
            metadata: ProfileMetadata::default(),
            socd: SocdOverrides::default(),
            button_count: BUTTON_COUNT,
            remap: RemapTable::identity(),
            rules: RuleSet::default(),
        }
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Malformed`] for JSON that does not fit the
    /// document model, or any validation error from [`validate_document`].
    pub fn from_json(text: &str) -> ProfileResult<Self> {
        let document: ProfileDocument = serde_json::from_str(text)?;
        validate_document(&document)
    }

    /// Byte-slice variant of [`from_json`](Self::from_json), for documents
    /// read straight out of storage.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn from_slice(bytes: &[u8]) -> ProfileResult<Self> {
        let document: ProfileDocument = serde_json::from_slice(bytes)?;
        validate_document(&document)
    }

    pub fn is_builtin(&self) -> bool {
        *self == Self::builtin()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Outcome of [`load_or_builtin`].
#[derive(Debug, Clone)]
pub struct ProfileLoad {
    pub profile: Profile,
    /// Why the document was refused, when the built-in profile was used instead.
    pub fallback: Option<ProfileError>,
}

impl ProfileLoad {
    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Load a document, falling back to [`Profile::builtin`] if it is refused.
///
/// Never applies part of an invalid document.
pub fn load_or_builtin(text: &str) -> ProfileLoad {
    match Profile::from_json(text) {
        Ok(profile) => {
            info!(
                name = %profile.metadata.name,
                rules = profile.rules.len(),
                remapped = profile.remap.remapped().count(),
                "Loaded profile"
            );
            ProfileLoad {
                profile,
                fallback: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "Profile rejected, using built-in default");
            ProfileLoad {
                profile: Profile::builtin(),
                fallback: Some(e),
            }
        }
    }
}
