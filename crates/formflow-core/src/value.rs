//! Form value types.
//!
//! The [`FormValue`] enum is the universal representation of a single leaf
//! value in a form: text inputs, numeric inputs, checkboxes, and date
//! pickers all map onto one of its variants. A form's full state is a
//! [`ValueMap`] keyed by [`FieldPath`](crate::path::FieldPath).

use std::collections::BTreeMap;
use std::fmt;

use crate::path::FieldPath;

/// A map of field path to current value. Ordered so that snapshots and
/// validation passes are deterministic.
pub type ValueMap = BTreeMap<FieldPath, FormValue>;

/// A single leaf value in a form.
///
/// # Examples
///
/// ```
/// use formflow_core::value::FormValue;
///
/// let v = FormValue::from("hello");
/// assert_eq!(v, FormValue::Str("hello".to_string()));
/// assert!(!v.is_empty());
/// assert!(FormValue::Null.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FormValue {
    /// No value (unset inputs, cleared date pickers).
    Null,
    /// A checkbox or toggle state.
    Bool(bool),
    /// A whole number input.
    Int(i64),
    /// A fractional number input.
    Float(f64),
    /// A text input.
    Str(String),
    /// A date input.
    Date(chrono::NaiveDate),
}

impl FormValue {
    /// Returns `true` if this value counts as absent for the required check.
    ///
    /// `Null` and the empty string are absent; everything else (including
    /// `Bool(false)` and `Int(0)`) is present.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the string contents if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer contents if this is an `Int` value.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the boolean contents if this is a `Bool` value.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, ""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{d}"),
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for FormValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FormValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for FormValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FormValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FormValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FormValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<chrono::NaiveDate> for FormValue {
    fn from(v: chrono::NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
