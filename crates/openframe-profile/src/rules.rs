//! Declarative button-combination rules.

use openframe_state::{FieldValue, InputState, OutputField, OutputState, StateError, StateResult};
use tracing::debug;

/// "When every button in `required` is held, set these fields."
///
/// Assignments keep document order; each field appears at most once and its
/// value always matches the field's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapRule {
    required: InputState,
    assignments: Vec<(OutputField, FieldValue)>,
}

impl RemapRule {
    pub fn new(required: InputState) -> Self {
        Self {
            required,
            assignments: Vec::new(),
        }
    }

    /// Add `field = value` to the rule. A repeated field keeps its first
    /// position and takes the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::FieldKindMismatch`] when `value` does not fit
    /// `field`.
    pub fn set(&mut self, field: OutputField, value: FieldValue) -> StateResult<()> {
        if value.kind() != field.kind() {
            return Err(StateError::FieldKindMismatch {
                field: field.name(),
                expected: field.kind(),
            });
        }
        match self.assignments.iter_mut().find(|(existing, _)| *existing == field) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((field, value)),
        }
        Ok(())
    }

    pub fn required(&self) -> InputState {
        self.required
    }

    pub fn assignments(&self) -> &[(OutputField, FieldValue)] {
        &self.assignments
    }

    /// True when every required button is held in the logical snapshot.
    #[inline]
    pub fn matches(&self, logical: &InputState) -> bool {
        logical.contains(self.required)
    }

    pub fn apply(&self, out: &mut OutputState) {
        for &(field, value) in &self.assignments {
            if let Err(mismatch) = out.assign(field, value) {
                debug!(%mismatch, "Rule assignment skipped");
            }
        }
    }
}

/// Ordered rule list.
///
/// Evaluated in order against every frame; when several matching rules write
/// the same field, the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<RemapRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RemapRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemapRule> {
        self.rules.iter()
    }

    /// Apply every matching rule to `out`, in order. Returns how many matched.
    pub fn apply(&self, logical: &InputState, out: &mut OutputState) -> usize {
        let mut matched = 0;
        for rule in self.rules.iter().filter(|rule| rule.matches(logical)) {
            rule.apply(out);
            matched += 1;
        }
        matched
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RemapRule;
    type IntoIter = std::slice::Iter<'a, RemapRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openframe_state::LogicalButton::*;

    fn rule(required: &[openframe_state::LogicalButton], field: OutputField, value: FieldValue) -> RemapRule {
        let mut rule = RemapRule::new(InputState::from_buttons(required));
        assert!(rule.set(field, value).is_ok());
        rule
    }

    #[test]
    fn test_conjunction_required() {
        let r = rule(&[Left, ModX], OutputField::LeftStickX, FieldValue::Analog(75));
        assert!(!r.matches(&InputState::from_buttons(&[Left])));
        assert!(r.matches(&InputState::from_buttons(&[Left, ModX])));
        assert!(r.matches(&InputState::from_buttons(&[Left, ModX, A])));
    }

    #[test]
    fn test_last_match_wins() {
        let rules = RuleSet::new(vec![
            rule(&[Left], OutputField::LeftStickX, FieldValue::Analog(28)),
            rule(&[Left, ModX], OutputField::LeftStickX, FieldValue::Analog(75)),
        ]);
        let mut out = OutputState::neutral();
        let matched = rules.apply(&InputState::from_buttons(&[Left, ModX]), &mut out);
        assert_eq!(matched, 2);
        assert_eq!(out.left_stick_x, 75);
    }

    #[test]
    fn test_non_matching_rules_have_no_effect() {
        let rules = RuleSet::new(vec![
            rule(&[Left, ModX], OutputField::LeftStickX, FieldValue::Analog(75)),
            rule(&[Left], OutputField::LeftStickX, FieldValue::Analog(28)),
        ]);
        let mut out = OutputState::neutral();
        rules.apply(&InputState::from_buttons(&[Left]), &mut out);
        assert_eq!(out.left_stick_x, 28);
    }

    #[test]
    fn test_rule_only_writes_its_fields() {
        let r = rule(&[Start], OutputField::Start, FieldValue::Digital(true));
        let mut out = OutputState::neutral();
        out.left_stick_x = 200;
        r.apply(&mut out);
        assert!(out.start);
        assert_eq!(out.left_stick_x, 200);
    }

    #[test]
    fn test_empty_rule_always_matches() {
        let r = rule(&[], OutputField::Home, FieldValue::Digital(true));
        assert!(r.matches(&InputState::new()));
    }

    #[test]
    fn test_set_rejects_kind_mismatch() {
        let mut r = RemapRule::new(InputState::from_buttons(&[A]));
        assert!(r.set(OutputField::LeftStickX, FieldValue::Digital(true)).is_err());
        assert!(r.set(OutputField::A, FieldValue::Analog(3)).is_err());
        assert!(r.assignments().is_empty());
    }

    #[test]
    fn test_repeated_field_takes_last_value_in_place() {
        let mut r = RemapRule::new(InputState::new());
        assert!(r.set(OutputField::ButtonL, FieldValue::Digital(true)).is_ok());
        assert!(r.set(OutputField::LeftStickX, FieldValue::Analog(75)).is_ok());
        assert!(r.set(OutputField::ButtonL, FieldValue::Digital(false)).is_ok());
        assert_eq!(
            r.assignments(),
            &[
                (OutputField::ButtonL, FieldValue::Digital(false)),
                (OutputField::LeftStickX, FieldValue::Analog(75)),
            ]
        );
    }
}
