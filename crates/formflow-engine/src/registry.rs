//! The field registry.
//!
//! Maps each registered [`FieldPath`] to its [`FieldRule`]. Registration
//! order does not matter; iteration is in path order so validation passes
//! are deterministic.

use std::collections::BTreeMap;

use tracing::debug;

use formflow_core::path::FieldPath;
use formflow_core::value::FormValue;

use crate::rules::FieldRule;

/// A handle to a registered field.
///
/// Bindings are cheap path wrappers returned by
/// [`FieldRegistry::register`]; the rendering layer keeps them as stable
/// references to the inputs it wires up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    path: FieldPath,
}

impl FieldBinding {
    /// Returns the bound field path.
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }
}

/// Registry of field paths and their declarative rules.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<FieldPath, FieldRule>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Registers a field under `path` with the given rule, returning a
    /// binding for it.
    ///
    /// Registering a path twice replaces the previous rule; the last write
    /// wins and the replacement is logged.
    pub fn register(&mut self, path: FieldPath, rule: FieldRule) -> FieldBinding {
        if self.fields.insert(path.clone(), rule).is_some() {
            debug!(%path, "re-registered field, replacing previous rule");
        }
        FieldBinding { path }
    }

    /// Removes the field registered under `path`, returning its rule.
    pub fn unregister(&mut self, path: &FieldPath) -> Option<FieldRule> {
        self.fields.remove(path)
    }

    /// Returns `true` if a field is registered under `path`.
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.fields.contains_key(path)
    }

    /// Returns the rule registered under `path`.
    pub fn rule(&self, path: &FieldPath) -> Option<&FieldRule> {
        self.fields.get(path)
    }

    /// Returns the default value of the field registered under `path`.
    pub fn initial(&self, path: &FieldPath) -> Option<&FormValue> {
        self.fields.get(path).map(FieldRule::initial_value)
    }

    /// Iterates registered paths and rules in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldRule)> {
        self.fields.iter()
    }

    /// Iterates registered paths in path order.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.fields.keys()
    }

    /// Returns the number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_returns_binding() {
        let mut registry = FieldRegistry::new();
        let binding = registry.register(
            FieldPath::root("username"),
            FieldRule::new().required("Username is required"),
        );
        assert_eq!(binding.path(), &FieldPath::root("username"));
        assert!(registry.contains(binding.path()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reregister_replaces_rule() {
        let mut registry = FieldRegistry::new();
        let path = FieldPath::root("age");
        registry.register(path.clone(), FieldRule::new());
        registry.register(path.clone(), FieldRule::new().required("Age is compulsory"));
        assert_eq!(registry.len(), 1);
        assert!(registry.rule(&path).unwrap().is_required());
    }

    #[test]
    fn test_unregister() {
        let mut registry = FieldRegistry::new();
        let path = FieldPath::root("email");
        registry.register(path.clone(), FieldRule::new());
        assert!(registry.unregister(&path).is_some());
        assert!(!registry.contains(&path));
        assert!(registry.unregister(&path).is_none());
    }

    #[test]
    fn test_initial_value_lookup() {
        let mut registry = FieldRegistry::new();
        let path = FieldPath::root("username");
        registry.register(path.clone(), FieldRule::new().initial("guest"));
        assert_eq!(
            registry.initial(&path),
            Some(&FormValue::Str("guest".into()))
        );
        assert_eq!(registry.initial(&FieldPath::root("missing")), None);
    }

    #[test]
    fn test_iteration_in_path_order() {
        let mut registry = FieldRegistry::new();
        registry.register(FieldPath::root("username"), FieldRule::new());
        registry.register(FieldPath::root("channel"), FieldRule::new());
        registry.register(FieldPath::root("email"), FieldRule::new());
        let order: Vec<String> = registry.paths().map(ToString::to_string).collect();
        assert_eq!(order, vec!["channel", "email", "username"]);
    }
}
