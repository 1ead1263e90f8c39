//! Declarative per-field validation rules.
//!
//! A [`FieldRule`] captures everything the validation pipeline needs to know
//! about one field: the required message, an optional pattern, an ordered
//! list of custom validators, an optional disabled predicate, and the
//! field's default value. Rules are immutable once registered.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use formflow_core::error::FormError;
use formflow_core::value::{FormValue, ValueMap};

/// A named custom validator: a predicate over the field's value plus the
/// message surfaced when the predicate returns `false`.
#[derive(Clone)]
pub struct CustomValidator {
    /// The validator's declared name (used in error payloads and logs).
    pub name: String,
    /// Returns `true` when the value passes.
    pub check: Arc<dyn Fn(&FormValue) -> bool + Send + Sync>,
    /// The failure message.
    pub message: String,
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A pattern rule: a compiled regex plus its failure message.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// The compiled pattern.
    pub regex: Regex,
    /// The failure message.
    pub message: String,
}

/// The declarative validation rule for a single field.
///
/// Evaluation order during validation is fixed: the disabled predicate
/// first (a disabled field skips validation entirely), then the required
/// check (which short-circuits when the value is absent), then the pattern,
/// then the custom validators in declaration order. The first failure wins.
///
/// # Examples
///
/// ```
/// use formflow_engine::rules::FieldRule;
/// use formflow_core::value::FormValue;
///
/// let rule = FieldRule::new()
///     .required("Email is required")
///     .pattern_str(r"^\w+@\w+\.\w+$", "Invalid email address")
///     .unwrap()
///     .validate("not_admin", |v| {
///         v.as_str() != Some("admin@example.com")
///     }, "Enter a different email address");
/// assert!(rule.is_required());
/// ```
#[derive(Clone)]
pub struct FieldRule {
    pub(crate) required: Option<String>,
    pub(crate) pattern: Option<PatternRule>,
    pub(crate) validators: Vec<CustomValidator>,
    pub(crate) disabled_when: Option<Arc<dyn Fn(&ValueMap) -> bool + Send + Sync>>,
    pub(crate) initial: FormValue,
}

impl Default for FieldRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule {
    /// Creates an empty rule: optional, no pattern, no validators, never
    /// disabled, defaulting to [`FormValue::Null`].
    pub fn new() -> Self {
        Self {
            required: None,
            pattern: None,
            validators: Vec::new(),
            disabled_when: None,
            initial: FormValue::Null,
        }
    }

    /// Marks the field required, with the message surfaced when the value
    /// is absent.
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Adds a pattern check from an already-compiled regex.
    #[must_use]
    pub fn pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some(PatternRule {
            regex,
            message: message.into(),
        });
        self
    }

    /// Adds a pattern check from a pattern string, failing on a malformed
    /// expression.
    pub fn pattern_str(
        self,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, FormError> {
        let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.pattern(regex, message))
    }

    /// Appends a named custom validator. Validators run in declaration
    /// order; the first one whose predicate returns `false` supplies the
    /// field's error message.
    #[must_use]
    pub fn validate(
        mut self,
        name: impl Into<String>,
        check: impl Fn(&FormValue) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.validators.push(CustomValidator {
            name: name.into(),
            check: Arc::new(check),
            message: message.into(),
        });
        self
    }

    /// Sets the disabled predicate, evaluated against the live value map
    /// before every validation pass. While it returns `true` the field is
    /// excluded from validation entirely.
    #[must_use]
    pub fn disabled_when(
        mut self,
        predicate: impl Fn(&ValueMap) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.disabled_when = Some(Arc::new(predicate));
        self
    }

    /// Sets the field's default value. Defaults seed the form's values at
    /// initialization and anchor the dirty comparison.
    #[must_use]
    pub fn initial(mut self, value: impl Into<FormValue>) -> Self {
        self.initial = value.into();
        self
    }

    /// Returns `true` if the field is required.
    pub const fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Returns the field's default value.
    pub const fn initial_value(&self) -> &FormValue {
        &self.initial
    }

    /// Evaluates the disabled predicate against the given values.
    ///
    /// Always computed fresh so a change elsewhere in the form takes effect
    /// on the very next validation pass.
    pub fn is_disabled(&self, values: &ValueMap) -> bool {
        self.disabled_when.as_ref().is_some_and(|p| p(values))
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("pattern", &self.pattern)
            .field("validators", &self.validators)
            .field("has_disabled_predicate", &self.disabled_when.is_some())
            .field("initial", &self.initial)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formflow_core::path::FieldPath;

    #[test]
    fn test_builder_chain() {
        let rule = FieldRule::new()
            .required("Username is required")
            .initial("")
            .validate("no_spaces", |v| {
                v.as_str().map_or(true, |s| !s.contains(' '))
            }, "No spaces allowed");
        assert!(rule.is_required());
        assert_eq!(rule.initial_value(), &FormValue::Str(String::new()));
        assert_eq!(rule.validators.len(), 1);
        assert_eq!(rule.validators[0].name, "no_spaces");
    }

    #[test]
    fn test_pattern_str_invalid_regex() {
        let result = FieldRule::new().pattern_str("(unclosed", "nope");
        assert!(matches!(
            result,
            Err(FormError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_pattern_str_valid_regex() {
        let rule = FieldRule::new()
            .pattern_str(r"^\d+$", "Digits only")
            .unwrap();
        assert!(rule.pattern.is_some());
    }

    #[test]
    fn test_disabled_predicate_reads_live_values() {
        let rule = FieldRule::new().disabled_when(|values| {
            values
                .get(&FieldPath::root("channel"))
                .map_or(true, FormValue::is_empty)
        });

        let mut values = ValueMap::new();
        assert!(rule.is_disabled(&values));
        values.insert(FieldPath::root("channel"), FormValue::from("code"));
        assert!(!rule.is_disabled(&values));
    }

    #[test]
    fn test_rule_without_predicate_is_never_disabled() {
        let rule = FieldRule::new();
        assert!(!rule.is_disabled(&ValueMap::new()));
    }

    #[test]
    fn test_rule_is_clone() {
        let rule = FieldRule::new()
            .required("msg")
            .validate("always", |_| true, "never shown");
        let copy = rule.clone();
        assert!(copy.is_required());
        assert_eq!(copy.validators.len(), 1);
    }

    #[test]
    fn test_debug_omits_closures() {
        let rule = FieldRule::new().disabled_when(|_| true);
        let text = format!("{rule:?}");
        assert!(text.contains("has_disabled_predicate: true"));
    }
}
