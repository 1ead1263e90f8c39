//! Typed field paths.
//!
//! A [`FieldPath`] addresses a single leaf value within a form's nested value
//! tree, e.g. `username`, `socials.twitter`, or `phone_list.0.number`. Paths
//! are parsed once and validated up front, so lookups never operate on raw
//! strings.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormError;

/// One segment of a [`FieldPath`].
///
/// `Key` segments address named sub-fields; `Index` segments address entries
/// of a repeated field group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A named sub-field, e.g. `twitter` in `socials.twitter`.
    Key(String),
    /// A positional entry, e.g. `0` in `phone_list.0.number`.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => write!(f, "{k}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// The dotted/indexed address of a leaf value within the form's value tree.
///
/// Paths are ordered and hashable so they can key the value and error maps.
/// The textual form uses `.` as the separator, with purely numeric segments
/// parsed as indices.
///
/// # Examples
///
/// ```
/// use formflow_core::path::FieldPath;
///
/// let parsed = FieldPath::parse("phone_list.0.number").unwrap();
/// let built = FieldPath::root("phone_list").index(0).key("number");
/// assert_eq!(parsed, built);
/// assert_eq!(built.to_string(), "phone_list.0.number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates a single-segment path from a key name.
    pub fn root(key: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(key.into())],
        }
    }

    /// Appends a key segment, returning the extended path.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Appends an index segment, returning the extended path.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// Parses a dotted path string.
    ///
    /// Purely numeric segments become [`PathSegment::Index`]; everything else
    /// becomes [`PathSegment::Key`]. Empty input and empty segments (leading,
    /// trailing, or doubled dots) are rejected.
    pub fn parse(raw: &str) -> Result<Self, FormError> {
        if raw.is_empty() {
            return Err(FormError::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty".to_string(),
            });
        }
        let mut segments = Vec::new();
        for part in raw.split('.') {
            if part.is_empty() {
                return Err(FormError::InvalidPath {
                    path: raw.to_string(),
                    reason: "empty segment".to_string(),
                });
            }
            if part.bytes().all(|b| b.is_ascii_digit()) {
                let index = part.parse::<usize>().map_err(|e| FormError::InvalidPath {
                    path: raw.to_string(),
                    reason: e.to_string(),
                })?;
                segments.push(PathSegment::Index(index));
            } else {
                segments.push(PathSegment::Key(part.to_string()));
            }
        }
        Ok(Self { segments })
    }

    /// Returns the path's segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    ///
    /// Constructed paths always have at least one segment; this exists for
    /// completeness of the container API.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if `prefix` is a proper or improper prefix of this path.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Returns the index value of the segment immediately following `prefix`,
    /// if this path extends `prefix` with an index segment.
    ///
    /// Used by the field-array controller to find which entry a path belongs to.
    pub fn index_after(&self, prefix: &Self) -> Option<usize> {
        if !self.starts_with(prefix) {
            return None;
        }
        match self.segments.get(prefix.segments.len()) {
            Some(PathSegment::Index(i)) => Some(*i),
            _ => None,
        }
    }

    /// Returns a copy of this path with the index segment following `prefix`
    /// replaced by `new_index`.
    ///
    /// Used to renumber entry paths when an earlier entry is removed. Returns
    /// the path unchanged if it does not extend `prefix` with an index.
    #[must_use]
    pub fn with_index_after(&self, prefix: &Self, new_index: usize) -> Self {
        let mut out = self.clone();
        if self.index_after(prefix).is_some() {
            out.segments[prefix.segments.len()] = PathSegment::Index(new_index);
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let path = FieldPath::parse("username").unwrap();
        assert_eq!(path.segments(), &[PathSegment::Key("username".into())]);
    }

    #[test]
    fn test_parse_nested() {
        let path = FieldPath::parse("socials.twitter").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_string(), "socials.twitter");
    }

    #[test]
    fn test_parse_indexed() {
        let path = FieldPath::parse("phone_list.0.number").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("phone_list".into()),
                PathSegment::Index(0),
                PathSegment::Key("number".into()),
            ]
        );
    }

    #[test]
    fn test_parse_empty_rejected() {
        assert!(FieldPath::parse("").is_err());
    }

    #[test]
    fn test_parse_empty_segment_rejected() {
        assert!(FieldPath::parse("socials..twitter").is_err());
        assert!(FieldPath::parse(".username").is_err());
        assert!(FieldPath::parse("username.").is_err());
    }

    #[test]
    fn test_builder_matches_parse() {
        let built = FieldPath::root("phone_numbers").index(1);
        let parsed = FieldPath::parse("phone_numbers.1").unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_starts_with() {
        let prefix = FieldPath::root("phone_list");
        let path = FieldPath::parse("phone_list.2.number").unwrap();
        assert!(path.starts_with(&prefix));
        assert!(path.starts_with(&path));
        assert!(!prefix.starts_with(&path));
        assert!(!FieldPath::root("phones").starts_with(&prefix));
    }

    #[test]
    fn test_index_after() {
        let prefix = FieldPath::root("phone_list");
        let path = FieldPath::parse("phone_list.2.number").unwrap();
        assert_eq!(path.index_after(&prefix), Some(2));
        assert_eq!(FieldPath::root("username").index_after(&prefix), None);
        // Key follows the prefix, not an index
        let nested = FieldPath::parse("phone_list.meta").unwrap();
        assert_eq!(nested.index_after(&prefix), None);
    }

    #[test]
    fn test_with_index_after() {
        let prefix = FieldPath::root("phone_list");
        let path = FieldPath::parse("phone_list.3.number").unwrap();
        let shifted = path.with_index_after(&prefix, 2);
        assert_eq!(shifted.to_string(), "phone_list.2.number");
        // Unrelated paths come back unchanged
        let other = FieldPath::root("username");
        assert_eq!(other.with_index_after(&prefix, 0), other);
    }

    #[test]
    fn test_ordering_is_stable() {
        let mut paths = vec![
            FieldPath::parse("phone_list.1.number").unwrap(),
            FieldPath::parse("phone_list.0.number").unwrap(),
            FieldPath::parse("email").unwrap(),
        ];
        paths.sort();
        assert_eq!(paths[0].to_string(), "email");
    }

    #[test]
    fn test_serde_round_trip() {
        let path = FieldPath::parse("socials.twitter").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"socials.twitter\"");
        let back: FieldPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_deserialize_invalid_path_fails() {
        let result: Result<FieldPath, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
