//! Error types for the formflow engine.
//!
//! Two families of errors exist. [`FieldError`] describes a validation
//! failure for a single field; these are recovered into the form's error map
//! and never propagated as `Err` to callers. [`FormError`] describes misuse
//! of the engine itself (unknown paths, malformed patterns, illegal array
//! operations); unknown-field misuse is logged rather than surfaced so the
//! UI stays responsive.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;

/// A map of field path to its current validation error. Ordered so that
/// error reporting is deterministic.
pub type ErrorMap = BTreeMap<FieldPath, FieldError>;

/// A validation failure for a single field.
///
/// The variant records which stage of the pipeline failed; the payload is
/// the user-facing message configured on the rule or schema.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum FieldError {
    /// The field is required and its value is absent.
    #[error("{0}")]
    Required(String),
    /// The field's string value does not match the configured pattern.
    #[error("{0}")]
    PatternMismatch(String),
    /// A custom validator predicate rejected the value.
    #[error("{message}")]
    Custom {
        /// The declared name of the failing validator.
        validator: String,
        /// The configured failure message.
        message: String,
    },
    /// An external schema validator reported an issue for this path.
    #[error("{0}")]
    Schema(String),
}

impl FieldError {
    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Required(m) | Self::PatternMismatch(m) | Self::Schema(m) => m,
            Self::Custom { message, .. } => message,
        }
    }

    /// Returns a short machine-readable code for the failure kind.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required(_) => "required",
            Self::PatternMismatch(_) => "pattern",
            Self::Custom { .. } => "custom",
            Self::Schema(_) => "schema",
        }
    }
}

/// A single issue reported by an external schema validator.
///
/// Schema validators see the whole value snapshot and return a flat list of
/// issues, each addressed to one field path.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaIssue {
    /// The field the issue applies to.
    pub path: FieldPath,
    /// The user-facing message.
    pub message: String,
}

impl SchemaIssue {
    /// Creates a new issue for the given path.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Aggregate of all issues produced by one schema validation pass.
///
/// The engine flattens the issues into the per-path error map; this wrapper
/// exists for consumers that want the whole batch at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    /// The issues, in the order the schema reported them.
    pub issues: Vec<SchemaIssue>,
}

impl SchemaValidationError {
    /// Wraps a batch of schema issues.
    pub const fn new(issues: Vec<SchemaIssue>) -> Self {
        Self { issues }
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}

/// Engine misuse and structural errors.
///
/// Unlike [`FieldError`], these never end up in the error map. `UnknownField`
/// in particular is logged and swallowed at the `set_value` boundary.
#[derive(Error, Debug)]
pub enum FormError {
    /// A value was set or read for a path no field is registered under.
    #[error("unknown field path: {0}")]
    UnknownField(FieldPath),

    /// A path string could not be parsed.
    #[error("invalid field path {path:?}: {reason}")]
    InvalidPath {
        /// The raw path text.
        path: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A pattern rule was declared with a malformed regular expression.
    #[error("invalid pattern {pattern:?}")]
    InvalidPattern {
        /// The raw pattern text.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// An array operation addressed an entry that does not exist.
    #[error("array index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The array length at the time of the call.
        len: usize,
    },

    /// An array removal would shrink the array below its configured minimum.
    #[error("cannot remove entry: array is at its minimum length of {min_len}")]
    MinLenReached {
        /// The configured minimum length.
        min_len: usize,
    },
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;
