//! The declarative object-schema DSL.
//!
//! An [`ObjectSchema`] maps field paths to typed per-field schemas built
//! with [`string`], [`integer`], and [`boolean`]. Each field schema carries
//! an ordered chain of refinements; the first failing check per field
//! supplies its issue. A value of the wrong type fails with a type-mismatch
//! message before any refinement runs.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use formflow_core::error::SchemaIssue;
use formflow_core::path::FieldPath;
use formflow_core::value::{FormValue, ValueMap};
use formflow_engine::schema::SchemaValidator;

use crate::EMAIL_RE;

/// The expected type of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaKind {
    Str,
    Int,
    Bool,
}

impl SchemaKind {
    const fn describe(self) -> &'static str {
        match self {
            Self::Str => "text",
            Self::Int => "a whole number",
            Self::Bool => "true or false",
        }
    }

    fn accepts(self, value: &FormValue) -> bool {
        matches!(
            (self, value),
            (Self::Str, FormValue::Str(_))
                | (Self::Int, FormValue::Int(_))
                | (Self::Bool, FormValue::Bool(_))
        )
    }
}

enum Check {
    NonEmpty,
    MinLen(usize),
    MaxLen(usize),
    Email,
    Matches(Regex),
    Min(i64),
    Max(i64),
    Refine(Arc<dyn Fn(&FormValue) -> bool + Send + Sync>),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEmpty => write!(f, "NonEmpty"),
            Self::MinLen(n) => write!(f, "MinLen({n})"),
            Self::MaxLen(n) => write!(f, "MaxLen({n})"),
            Self::Email => write!(f, "Email"),
            Self::Matches(re) => write!(f, "Matches({:?})", re.as_str()),
            Self::Min(n) => write!(f, "Min({n})"),
            Self::Max(n) => write!(f, "Max({n})"),
            Self::Refine(_) => write!(f, "Refine(..)"),
        }
    }
}

/// A typed per-field schema: an expected type plus an ordered refinement
/// chain. Build with [`string`], [`integer`], or [`boolean`].
#[derive(Debug)]
pub struct FieldSchema {
    kind: SchemaKind,
    checks: Vec<(Check, String)>,
}

/// A schema expecting a text value.
pub fn string() -> FieldSchema {
    FieldSchema {
        kind: SchemaKind::Str,
        checks: Vec::new(),
    }
}

/// A schema expecting a whole-number value.
pub fn integer() -> FieldSchema {
    FieldSchema {
        kind: SchemaKind::Int,
        checks: Vec::new(),
    }
}

/// A schema expecting a boolean value.
pub fn boolean() -> FieldSchema {
    FieldSchema {
        kind: SchemaKind::Bool,
        checks: Vec::new(),
    }
}

impl FieldSchema {
    fn check(mut self, check: Check, message: impl Into<String>) -> Self {
        self.checks.push((check, message.into()));
        self
    }

    /// Rejects absent and empty values.
    #[must_use]
    pub fn nonempty(self, message: impl Into<String>) -> Self {
        self.check(Check::NonEmpty, message)
    }

    /// Rejects strings shorter than `n` characters.
    #[must_use]
    pub fn min_len(self, n: usize, message: impl Into<String>) -> Self {
        self.check(Check::MinLen(n), message)
    }

    /// Rejects strings longer than `n` characters.
    #[must_use]
    pub fn max_len(self, n: usize, message: impl Into<String>) -> Self {
        self.check(Check::MaxLen(n), message)
    }

    /// Rejects strings that do not look like an email address.
    #[must_use]
    pub fn email(self, message: impl Into<String>) -> Self {
        self.check(Check::Email, message)
    }

    /// Rejects strings that do not match `regex`.
    #[must_use]
    pub fn matches(self, regex: Regex, message: impl Into<String>) -> Self {
        self.check(Check::Matches(regex), message)
    }

    /// Rejects integers below `n`.
    #[must_use]
    pub fn min(self, n: i64, message: impl Into<String>) -> Self {
        self.check(Check::Min(n), message)
    }

    /// Rejects integers above `n`.
    #[must_use]
    pub fn max(self, n: i64, message: impl Into<String>) -> Self {
        self.check(Check::Max(n), message)
    }

    /// Rejects values for which `predicate` returns `false`.
    #[must_use]
    pub fn refine(
        self,
        predicate: impl Fn(&FormValue) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.check(Check::Refine(Arc::new(predicate)), message)
    }

    /// Evaluates this field schema against one value, returning the first
    /// failure message.
    fn first_failure(&self, value: Option<&FormValue>) -> Option<String> {
        let value = value.unwrap_or(&FormValue::Null);

        if value.is_empty() {
            // Absence is only an error when the chain demands presence.
            return self.checks.iter().find_map(|(check, message)| {
                matches!(check, Check::NonEmpty).then(|| message.clone())
            });
        }

        if !self.kind.accepts(value) {
            return Some(format!("Expected {}.", self.kind.describe()));
        }

        for (check, message) in &self.checks {
            let failed = match check {
                Check::NonEmpty => false, // handled above
                Check::MinLen(n) => value.as_str().is_some_and(|s| s.chars().count() < *n),
                Check::MaxLen(n) => value.as_str().is_some_and(|s| s.chars().count() > *n),
                Check::Email => value.as_str().is_some_and(|s| !EMAIL_RE.is_match(s)),
                Check::Matches(re) => value.as_str().is_some_and(|s| !re.is_match(s)),
                Check::Min(n) => value.as_int().is_some_and(|i| i < *n),
                Check::Max(n) => value.as_int().is_some_and(|i| i > *n),
                Check::Refine(predicate) => !predicate(value),
            };
            if failed {
                return Some(message.clone());
            }
        }
        None
    }
}

/// A declarative object schema: field paths mapped to typed field schemas,
/// validated in declaration order.
///
/// # Examples
///
/// ```
/// use formflow_schema::object::{string, ObjectSchema};
///
/// let schema = ObjectSchema::new()
///     .field("username", string().nonempty("Username is required"))
///     .field(
///         "email",
///         string()
///             .nonempty("Email is required")
///             .email("Email format is not valid"),
///     )
///     .field("channel", string().nonempty("Channel is required"));
/// ```
#[derive(Debug, Default)]
pub struct ObjectSchema {
    fields: Vec<(FieldPath, FieldSchema)>,
}

impl ObjectSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declares a top-level field. `name` becomes a single-segment path.
    #[must_use]
    pub fn field(self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.field_at(FieldPath::root(name), schema)
    }

    /// Declares a field at an arbitrary (possibly nested) path.
    #[must_use]
    pub fn field_at(mut self, path: FieldPath, schema: FieldSchema) -> Self {
        self.fields.push((path, schema));
        self
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SchemaValidator for ObjectSchema {
    fn validate(&self, values: &ValueMap) -> Vec<SchemaIssue> {
        let issues: Vec<SchemaIssue> = self
            .fields
            .iter()
            .filter_map(|(path, schema)| {
                schema
                    .first_failure(values.get(path))
                    .map(|message| SchemaIssue::new(path.clone(), message))
            })
            .collect();
        if !issues.is_empty() {
            tracing::debug!(schema = self.name(), issues = issues.len(), "schema rejected snapshot");
        }
        issues
    }

    fn name(&self) -> &str {
        "object_schema"
    }
}
