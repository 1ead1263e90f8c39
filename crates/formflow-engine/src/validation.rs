//! The validation pipeline.
//!
//! Per-field evaluation order is fixed:
//!
//! 1. Disabled predicate (a disabled field is skipped entirely)
//! 2. Required check (short-circuits when the value is absent)
//! 3. Pattern check (string values only)
//! 4. Custom validators, in declaration order
//!
//! The first failing stage supplies the field's single error. A full pass
//! additionally runs the attached schema validator over the whole snapshot
//! and flattens its issues into the same map, overwriting the declarative
//! outcome for affected paths.

use tracing::{debug, warn};

use formflow_core::error::{ErrorMap, FieldError};
use formflow_core::path::FieldPath;
use formflow_core::value::{FormValue, ValueMap};

use crate::registry::FieldRegistry;
use crate::schema::SchemaValidator;

/// Validates a single field against its declarative rule.
///
/// Returns `None` for valid, disabled, and unregistered paths (the latter
/// is logged). Schema validators are not consulted here; they only run
/// during [`validate_all`].
pub fn validate_field(
    registry: &FieldRegistry,
    values: &ValueMap,
    path: &FieldPath,
) -> Option<FieldError> {
    let Some(rule) = registry.rule(path) else {
        warn!(%path, "validate_field on unregistered path");
        return None;
    };

    // Recomputed against live values on every pass so a change elsewhere in
    // the form takes effect immediately.
    if rule.is_disabled(values) {
        debug!(%path, "field disabled, skipping validation");
        return None;
    }

    let absent = values.get(path).map_or(true, FormValue::is_empty);
    if absent {
        return rule.required.as_ref().map(|msg| {
            debug!(%path, "required check failed");
            FieldError::Required(msg.clone())
        });
    }

    let value = &values[path];

    if let Some(pattern) = &rule.pattern {
        if let Some(s) = value.as_str() {
            if !pattern.regex.is_match(s) {
                debug!(%path, "pattern check failed");
                return Some(FieldError::PatternMismatch(pattern.message.clone()));
            }
        }
    }

    for validator in &rule.validators {
        if !(validator.check)(value) {
            debug!(%path, validator = %validator.name, "custom validator failed");
            return Some(FieldError::Custom {
                validator: validator.name.clone(),
                message: validator.message.clone(),
            });
        }
    }

    None
}

/// Runs a full validation pass: every registered field's declarative rule,
/// then the schema overlay.
///
/// Schema issues overwrite the declarative outcome for their path; among
/// several schema issues for one path the first reported wins. Issues
/// addressed to unregistered paths are dropped and logged, preserving the
/// invariant that every error path is a registered field path.
pub fn validate_all(
    registry: &FieldRegistry,
    values: &ValueMap,
    schema: Option<&dyn SchemaValidator>,
) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for (path, _) in registry.iter() {
        if let Some(error) = validate_field(registry, values, path) {
            errors.insert(path.clone(), error);
        }
    }

    if let Some(schema) = schema {
        let issues = schema.validate(values);
        debug!(
            schema = schema.name(),
            issue_count = issues.len(),
            "schema validation pass"
        );
        let mut schema_paths = std::collections::BTreeSet::new();
        for issue in issues {
            if !registry.contains(&issue.path) {
                warn!(path = %issue.path, "schema issue for unregistered path dropped");
                continue;
            }
            if schema_paths.insert(issue.path.clone()) {
                errors.insert(issue.path, FieldError::Schema(issue.message));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use formflow_core::error::SchemaIssue;
    use crate::rules::FieldRule;

    fn email_registry() -> FieldRegistry {
        let mut registry = FieldRegistry::new();
        registry.register(
            FieldPath::root("email"),
            FieldRule::new()
                .required("Email is required")
                .pattern_str(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$", "Invalid email address")
                .unwrap()
                .validate(
                    "not_admin",
                    |v| v.as_str() != Some("admin@example.com"),
                    "Enter a different email address",
                )
                .validate(
                    "no_blacklisted",
                    |v| v.as_str().map_or(true, |s| !s.ends_with("baddomain.com")),
                    "This domain is not supported",
                ),
        );
        registry
    }

    fn values_with(path: &str, value: FormValue) -> ValueMap {
        let mut values = ValueMap::new();
        values.insert(FieldPath::parse(path).unwrap(), value);
        values
    }

    #[test]
    fn test_required_short_circuits() {
        let registry = email_registry();
        let values = values_with("email", FormValue::Str(String::new()));
        let err = validate_field(&registry, &values, &FieldPath::root("email")).unwrap();
        assert_eq!(err, FieldError::Required("Email is required".into()));
    }

    #[test]
    fn test_missing_value_counts_as_absent() {
        let registry = email_registry();
        let err = validate_field(&registry, &ValueMap::new(), &FieldPath::root("email")).unwrap();
        assert_eq!(err.code(), "required");
    }

    #[test]
    fn test_pattern_runs_after_required() {
        let registry = email_registry();
        let values = values_with("email", FormValue::from("not-an-email"));
        let err = validate_field(&registry, &values, &FieldPath::root("email")).unwrap();
        assert_eq!(err, FieldError::PatternMismatch("Invalid email address".into()));
    }

    #[test]
    fn test_custom_validators_run_in_declaration_order() {
        let registry = email_registry();
        // Passes the pattern, fails the first custom validator.
        let values = values_with("email", FormValue::from("admin@example.com"));
        let err = validate_field(&registry, &values, &FieldPath::root("email")).unwrap();
        assert_eq!(err.message(), "Enter a different email address");

        let values = values_with("email", FormValue::from("user@baddomain.com"));
        let err = validate_field(&registry, &values, &FieldPath::root("email")).unwrap();
        assert_eq!(err.message(), "This domain is not supported");
    }

    #[test]
    fn test_valid_email_passes() {
        let registry = email_registry();
        let values = values_with("email", FormValue::from("alice@example.com"));
        assert!(validate_field(&registry, &values, &FieldPath::root("email")).is_none());
    }

    #[test]
    fn test_optional_empty_field_skips_remaining_checks() {
        let mut registry = FieldRegistry::new();
        registry.register(
            FieldPath::root("nickname"),
            FieldRule::new()
                .pattern_str(r"^\w+$", "Letters only")
                .unwrap(),
        );
        let values = values_with("nickname", FormValue::Str(String::new()));
        assert!(validate_field(&registry, &values, &FieldPath::root("nickname")).is_none());
    }

    #[test]
    fn test_pattern_skipped_for_non_string_values() {
        let mut registry = FieldRegistry::new();
        registry.register(
            FieldPath::root("age"),
            FieldRule::new().pattern_str(r"^\d+$", "Digits only").unwrap(),
        );
        let values = values_with("age", FormValue::Int(30));
        assert!(validate_field(&registry, &values, &FieldPath::root("age")).is_none());
    }

    #[test]
    fn test_unregistered_path_is_none() {
        let registry = FieldRegistry::new();
        assert!(validate_field(&registry, &ValueMap::new(), &FieldPath::root("ghost")).is_none());
    }

    #[test]
    fn test_disabled_field_excluded_from_required() {
        let mut registry = FieldRegistry::new();
        registry.register(
            FieldPath::parse("socials.twitter").unwrap(),
            FieldRule::new()
                .required("Twitter is compulsory")
                .disabled_when(|values| {
                    values
                        .get(&FieldPath::root("channel"))
                        .map_or(true, FormValue::is_empty)
                }),
        );

        // Channel empty: twitter disabled, no error despite being required.
        let values = values_with("channel", FormValue::Str(String::new()));
        let path = FieldPath::parse("socials.twitter").unwrap();
        assert!(validate_field(&registry, &values, &path).is_none());

        // Channel set: predicate re-evaluated, required error comes back.
        let values = values_with("channel", FormValue::from("code"));
        let err = validate_field(&registry, &values, &path).unwrap();
        assert_eq!(err.message(), "Twitter is compulsory");
    }

    #[test]
    fn test_validate_all_collects_every_field() {
        let mut registry = email_registry();
        registry.register(
            FieldPath::root("username"),
            FieldRule::new().required("Username is required"),
        );
        let errors = validate_all(&registry, &ValueMap::new(), None);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[&FieldPath::root("username")].message(),
            "Username is required"
        );
    }

    struct StubSchema {
        issues: Vec<SchemaIssue>,
    }

    impl SchemaValidator for StubSchema {
        fn validate(&self, _values: &ValueMap) -> Vec<SchemaIssue> {
            self.issues.clone()
        }
    }

    #[test]
    fn test_schema_overwrites_declarative_outcome() {
        let registry = email_registry();
        let schema = StubSchema {
            issues: vec![SchemaIssue::new(
                FieldPath::root("email"),
                "Email format is not valid",
            )],
        };
        let errors = validate_all(&registry, &ValueMap::new(), Some(&schema));
        // Declarative pass produced a required error; the schema issue wins.
        assert_eq!(
            errors[&FieldPath::root("email")],
            FieldError::Schema("Email format is not valid".into())
        );
    }

    #[test]
    fn test_first_schema_issue_per_path_wins() {
        let registry = email_registry();
        let schema = StubSchema {
            issues: vec![
                SchemaIssue::new(FieldPath::root("email"), "first"),
                SchemaIssue::new(FieldPath::root("email"), "second"),
            ],
        };
        let errors = validate_all(&registry, &ValueMap::new(), Some(&schema));
        assert_eq!(errors[&FieldPath::root("email")].message(), "first");
    }

    #[test]
    fn test_schema_issue_for_unregistered_path_dropped() {
        let registry = email_registry();
        let schema = StubSchema {
            issues: vec![SchemaIssue::new(FieldPath::root("ghost"), "nope")],
        };
        let errors = validate_all(
            &registry,
            &values_with("email", FormValue::from("alice@example.com")),
            Some(&schema),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_all_is_idempotent() {
        let registry = email_registry();
        let values = values_with("email", FormValue::from("not-an-email"));
        let first = validate_all(&registry, &values, None);
        let second = validate_all(&registry, &values, None);
        assert_eq!(first, second);
    }
}
