//! The flat pattern-table schema DSL.
//!
//! A [`PatternSchema`] is an ordered table of per-path rules: required
//! checks, regex matches, and custom refinements. Rules are evaluated in
//! declaration order and the first failing rule per path supplies that
//! path's issue, so a `require` declared before a `matches` shadows the
//! format message when the value is absent.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use formflow_core::error::SchemaIssue;
use formflow_core::path::FieldPath;
use formflow_core::value::{FormValue, ValueMap};
use formflow_engine::schema::SchemaValidator;

use crate::EMAIL_RE;

enum RuleKind {
    Require,
    Matches(Regex),
    Refine(Arc<dyn Fn(&FormValue) -> bool + Send + Sync>),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Require => write!(f, "Require"),
            Self::Matches(re) => f.debug_tuple("Matches").field(&re.as_str()).finish(),
            Self::Refine(_) => write!(f, "Refine(..)"),
        }
    }
}

#[derive(Debug)]
struct PatternEntry {
    path: FieldPath,
    kind: RuleKind,
    message: String,
}

/// An ordered table of per-path pattern rules.
///
/// # Examples
///
/// ```
/// use formflow_core::path::FieldPath;
/// use formflow_schema::PatternSchema;
///
/// let schema = PatternSchema::new()
///     .require(FieldPath::root("username"), "Username is required")
///     .require(FieldPath::root("email"), "Email is required")
///     .email(FieldPath::root("email"), "Email format is not valid")
///     .require(FieldPath::root("channel"), "Channel is required");
/// ```
#[derive(Debug, Default)]
pub struct PatternSchema {
    rules: Vec<PatternEntry>,
}

impl PatternSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Requires a non-absent value at `path`.
    #[must_use]
    pub fn require(mut self, path: FieldPath, message: impl Into<String>) -> Self {
        self.rules.push(PatternEntry {
            path,
            kind: RuleKind::Require,
            message: message.into(),
        });
        self
    }

    /// Requires the string value at `path` to match `regex`. Absent and
    /// non-string values pass; combine with [`require`](Self::require) to
    /// also reject absence.
    #[must_use]
    pub fn matches(mut self, path: FieldPath, regex: Regex, message: impl Into<String>) -> Self {
        self.rules.push(PatternEntry {
            path,
            kind: RuleKind::Matches(regex),
            message: message.into(),
        });
        self
    }

    /// Requires the string value at `path` to look like an email address.
    #[must_use]
    pub fn email(self, path: FieldPath, message: impl Into<String>) -> Self {
        self.matches(path, EMAIL_RE.clone(), message)
    }

    /// Requires `predicate` to hold for the value at `path`. Absent values
    /// are passed to the predicate as [`FormValue::Null`].
    #[must_use]
    pub fn refine(
        mut self,
        path: FieldPath,
        predicate: impl Fn(&FormValue) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.rules.push(PatternEntry {
            path,
            kind: RuleKind::Refine(Arc::new(predicate)),
            message: message.into(),
        });
        self
    }

    /// Returns the number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl SchemaValidator for PatternSchema {
    fn validate(&self, values: &ValueMap) -> Vec<SchemaIssue> {
        let mut issues: Vec<SchemaIssue> = Vec::new();
        for entry in &self.rules {
            // First failing rule per path wins.
            if issues.iter().any(|i| i.path == entry.path) {
                continue;
            }
            let value = values.get(&entry.path);
            let failed = match &entry.kind {
                RuleKind::Require => value.map_or(true, FormValue::is_empty),
                RuleKind::Matches(regex) => value
                    .and_then(FormValue::as_str)
                    .is_some_and(|s| !s.is_empty() && !regex.is_match(s)),
                RuleKind::Refine(predicate) => {
                    !predicate(value.unwrap_or(&FormValue::Null))
                }
            };
            if failed {
                issues.push(SchemaIssue::new(entry.path.clone(), entry.message.clone()));
            }
        }
        if !issues.is_empty() {
            tracing::debug!(schema = self.name(), issues = issues.len(), "schema rejected snapshot");
        }
        issues
    }

    fn name(&self) -> &str {
        "pattern_schema"
    }
}
