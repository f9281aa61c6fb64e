//! Shared per-frame driver.

use crate::logic::{ModeKind, ModeLogic, ModeVariant};
use crate::ModeResult;
use openframe_profile::{Profile, load_or_builtin};
use openframe_socd::{SocdPair, SocdPolicy, SocdResolver};
use openframe_state::{InputState, LogicalButton, OutputState};
use tracing::{info, trace};

/// One game's remapping, SOCD configuration and output logic.
///
/// Owns the SOCD press memory, so a mode must be fed exactly one fresh scan
/// per frame and must not be shared between two input loops. Re-profiling
/// means building a new mode.
#[derive(Debug, Clone)]
pub struct ControllerMode {
    variant: ModeVariant,
    resolver: SocdResolver,
    profile: Profile,
}

impl ControllerMode {
    /// Build a mode with `policy` on all four stick axes, unless the profile
    /// overrides the horizontal or vertical group.
    pub fn new(kind: ModeKind, policy: SocdPolicy, profile: Profile) -> Self {
        let (horizontal, vertical) = profile.socd.resolve(policy);
        info!(
            mode = %kind,
            profile = %profile.metadata.name,
            horizontal = %horizontal,
            vertical = %vertical,
            "Controller mode constructed"
        );
        Self {
            variant: kind.variant(),
            resolver: SocdResolver::standard(horizontal, vertical),
            profile,
        }
    }

    /// Build a mode over an explicit set of SOCD pairs.
    ///
    /// Profile SOCD overrides are ignored: the pairs carry their own policies.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Socd`](crate::ModeError::Socd) if the pairs overlap
    /// or oppose a button with itself.
    pub fn with_pairs(
        kind: ModeKind,
        pairs: impl IntoIterator<Item = SocdPair>,
        profile: Profile,
    ) -> ModeResult<Self> {
        let resolver = SocdResolver::new(pairs)?;
        info!(
            mode = %kind,
            profile = %profile.metadata.name,
            pairs = resolver.pairs().len(),
            "Controller mode constructed"
        );
        Ok(Self {
            variant: kind.variant(),
            resolver,
            profile,
        })
    }

    pub fn ultimate_r4(policy: SocdPolicy, profile: Profile) -> Self {
        Self::new(ModeKind::UltimateR4, policy, profile)
    }

    pub fn profile_only(policy: SocdPolicy, profile: Profile) -> Self {
        Self::new(ModeKind::ProfileOnly, policy, profile)
    }

    /// Ultimate R4 with 2IP and the built-in profile. Used whenever a
    /// document is refused.
    pub fn builtin_default() -> Self {
        Self::ultimate_r4(SocdPolicy::default(), Profile::builtin())
    }

    /// Build a mode from a profile document.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Profile`](crate::ModeError::Profile) if the
    /// document is refused. Nothing from a refused document is applied.
    pub fn from_document(kind: ModeKind, policy: SocdPolicy, document: &str) -> ModeResult<Self> {
        let profile = Profile::from_json(document)?;
        Ok(Self::new(kind, policy, profile))
    }

    /// Build a mode from a profile document, falling back to the built-in
    /// profile if it is refused.
    pub fn from_document_or_default(kind: ModeKind, policy: SocdPolicy, document: &str) -> Self {
        let load = load_or_builtin(document);
        Self::new(kind, policy, load.profile)
    }

    /// Compute one frame's report from a raw (physical) snapshot.
    ///
    /// Remaps, resolves SOCD, resets the output to neutral, runs the variant's
    /// digital then analog computation and finally the profile's rules. The
    /// raw snapshot is not modified.
    pub fn update_outputs(&mut self, raw: &InputState) -> OutputState {
        let logical = self.profile.remap.to_logical(raw);
        let resolved = self.resolver.resolve(&logical);

        let mut out = OutputState::neutral();
        self.variant.update_digital(&resolved, &mut out);
        self.variant.update_analog(&resolved, &mut out);
        let matched = self.profile.rules.apply(&resolved, &mut out);

        trace!(
            raw = raw.bits(),
            resolved = resolved.bits(),
            rules = matched,
            "Frame computed"
        );
        out
    }

    /// True when the physical position driving `logical` is held in `raw`.
    pub fn is_pressed(&self, raw: &InputState, logical: LogicalButton) -> bool {
        self.profile.remap.is_pressed(raw, logical)
    }

    pub fn kind(&self) -> ModeKind {
        self.variant.kind()
    }

    pub fn name(&self) -> &'static str {
        self.variant.name()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn socd_pairs(&self) -> &[SocdPair] {
        self.resolver.pairs()
    }

    /// Forget SOCD press history, as after a reconnect.
    pub fn reset(&mut self) {
        self.resolver.reset();
    }
}

impl Default for ControllerMode {
    fn default() -> Self {
        Self::builtin_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModeError;
    use openframe_profile::ProfileError;
    use tracing_test::traced_test;
    use LogicalButton::*;

    fn held(buttons: &[LogicalButton]) -> InputState {
        InputState::from_buttons(buttons)
    }

    #[test]
    fn test_builtin_default() {
        let mode = ControllerMode::builtin_default();
        assert_eq!(mode.kind(), ModeKind::UltimateR4);
        assert!(mode.profile().is_builtin());
        assert!(
            mode.socd_pairs()
                .iter()
                .all(|p| p.policy == SocdPolicy::SecondInputPriority)
        );
    }

    #[test]
    fn test_profile_overrides_socd_group() -> ModeResult<()> {
        let mode = ControllerMode::from_document(
            ModeKind::UltimateR4,
            SocdPolicy::SecondInputPriority,
            r#"{ "horizontalSocd": "neutral", "inputMap": [] }"#,
        )?;
        for pair in mode.socd_pairs() {
            let expected = if matches!(pair.dir1, Left | CLeft) {
                SocdPolicy::Neutral
            } else {
                SocdPolicy::SecondInputPriority
            };
            assert_eq!(pair.policy, expected, "{}", pair.dir1);
        }
        Ok(())
    }

    #[test]
    fn test_rules_overlay_ladder() -> ModeResult<()> {
        let mut mode = ControllerMode::from_document(
            ModeKind::UltimateR4,
            SocdPolicy::SecondInputPriority,
            r#"{ "inputMap": [ { "buttons": [2, 5], "output": { "leftStickX": 60 } } ] }"#,
        )?;
        assert_eq!(mode.update_outputs(&held(&[Left, ModX])).left_stick_x, 60);
        assert_eq!(mode.update_outputs(&held(&[Left])).left_stick_x, 28);
        Ok(())
    }

    #[test]
    fn test_profile_only_starts_neutral() -> ModeResult<()> {
        let mut mode = ControllerMode::from_document(
            ModeKind::ProfileOnly,
            SocdPolicy::SecondInputPriority,
            r#"{ "inputMap": [ { "buttons": [19], "output": { "b": true } } ] }"#,
        )?;
        let out = mode.update_outputs(&held(&[A, Left]));
        assert!(out.b);
        assert!(!out.a);
        assert_eq!(out.left_stick_x, 128);
        Ok(())
    }

    #[test]
    fn test_remap_before_socd() -> ModeResult<()> {
        // Physical Right (4) drives logical Left and vice versa.
        let mut mode = ControllerMode::from_document(
            ModeKind::UltimateR4,
            SocdPolicy::SecondInputPriority,
            r#"{ "remap": { "left": 4, "right": 2 } }"#,
        )?;
        let out = mode.update_outputs(&held(&[Right]));
        assert_eq!(out.left_stick_x, 28);
        assert!(mode.is_pressed(&held(&[Right]), Left));
        assert!(!mode.is_pressed(&held(&[Right]), Right));
        Ok(())
    }

    #[test]
    fn test_from_document_propagates_error() {
        let result = ControllerMode::from_document(
            ModeKind::UltimateR4,
            SocdPolicy::Neutral,
            r#"{ "inputMap": [ { "buttons": [0], "output": {} } ] }"#,
        );
        assert!(matches!(
            result,
            Err(ModeError::Profile(ProfileError::IndexOutOfRange { index: 0, .. }))
        ));
    }

    #[test]
    fn test_with_pairs_rejects_overlap() {
        let result = ControllerMode::with_pairs(
            ModeKind::UltimateR4,
            [
                SocdPair::new(Left, Right, SocdPolicy::Neutral),
                SocdPair::new(Left, Up, SocdPolicy::Neutral),
            ],
            Profile::builtin(),
        );
        assert!(matches!(result, Err(ModeError::Socd(_))));
    }

    #[test]
    #[traced_test]
    fn test_fallback_is_logged() {
        let mode = ControllerMode::from_document_or_default(
            ModeKind::UltimateR4,
            SocdPolicy::SecondInputPriority,
            "not a profile",
        );
        assert!(mode.profile().is_builtin());
        assert!(logs_contain("Profile rejected"));
        assert!(logs_contain("Controller mode constructed"));
    }

    #[test]
    fn test_reset_forgets_priority() {
        let mut mode = ControllerMode::builtin_default();
        let _left = mode.update_outputs(&held(&[Left]));
        assert_eq!(mode.update_outputs(&held(&[Left, Right])).left_stick_x, 228);
        mode.reset();
        // After a reset both directions read as simultaneous presses.
        assert_eq!(mode.update_outputs(&held(&[Left, Right])).left_stick_x, 128);
    }
}
