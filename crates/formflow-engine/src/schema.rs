//! The pluggable schema validator capability.
//!
//! A schema validator sees the whole value snapshot at once and returns a
//! flat list of per-path issues. During a full validation pass the engine
//! flattens those issues into the same error map the declarative rules
//! write to, with schema issues overwriting the declarative outcome for
//! affected paths.

use formflow_core::error::SchemaIssue;
use formflow_core::value::ValueMap;

/// A whole-snapshot validator.
///
/// Implementations are interchangeable: the engine only ever calls
/// [`validate`](Self::validate) and flattens the returned issues. The
/// `formflow-schema` crate ships two implementations (a flat pattern-table
/// DSL and a declarative object-schema DSL); consumers can bring their own.
pub trait SchemaValidator: Send + Sync {
    /// Validates the full value snapshot, returning issues in report order.
    ///
    /// An empty list means the snapshot is valid. Multiple issues may target
    /// the same path; the engine keeps the first.
    fn validate(&self, values: &ValueMap) -> Vec<SchemaIssue>;

    /// Returns a human-readable name for this validator, used in logs.
    fn name(&self) -> &str {
        "schema"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formflow_core::path::FieldPath;
    use formflow_core::value::FormValue;

    struct RejectEmptyUsername;

    impl SchemaValidator for RejectEmptyUsername {
        fn validate(&self, values: &ValueMap) -> Vec<SchemaIssue> {
            let path = FieldPath::root("username");
            let empty = values.get(&path).map_or(true, FormValue::is_empty);
            if empty {
                vec![SchemaIssue::new(path, "Username is required")]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn test_trait_object_usage() {
        let schema: Box<dyn SchemaValidator> = Box::new(RejectEmptyUsername);
        assert_eq!(schema.name(), "schema");

        let issues = schema.validate(&ValueMap::new());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Username is required");

        let mut values = ValueMap::new();
        values.insert(FieldPath::root("username"), FormValue::from("alice"));
        assert!(schema.validate(&values).is_empty());
    }
}
