//! The form ownership root.
//!
//! A [`Form`] owns the registry and the live state: current values, the
//! error map, and the touched/dirty sets. UI events mutate it through
//! [`set_value`](Form::set_value) and [`mark_touched`](Form::mark_touched);
//! the rendering layer re-reads a [`FormSnapshot`] after every mutation.
//!
//! All operations are synchronous. Validation failures land in the error
//! map and are never returned as `Err`; setting an unregistered path is a
//! logged no-op so the UI stays responsive.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use formflow_core::error::{ErrorMap, FieldError};
use formflow_core::path::FieldPath;
use formflow_core::value::{FormValue, ValueMap};

use crate::options::{FormOptions, ValidateMode};
use crate::registry::FieldRegistry;
use crate::rules::FieldRule;
use crate::schema::SchemaValidator;
use crate::validation;

/// Per-call options for [`Form::set_value`].
///
/// The default marks the field dirty (the common change-event case) without
/// validating or touching; [`SetValueOpts::validated`] requests all three,
/// matching a programmatic set that should behave like a full user edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetValueOpts {
    /// Re-validate the field after the write.
    pub validate: bool,
    /// Update the dirty flag from the default-value comparison.
    pub mark_dirty: bool,
    /// Mark the field touched.
    pub mark_touched: bool,
}

impl Default for SetValueOpts {
    fn default() -> Self {
        Self {
            validate: false,
            mark_dirty: true,
            mark_touched: false,
        }
    }
}

impl SetValueOpts {
    /// Validate, mark dirty, and mark touched.
    pub const fn validated() -> Self {
        Self {
            validate: true,
            mark_dirty: true,
            mark_touched: true,
        }
    }

    /// Write the value only; leave every flag untouched.
    pub const fn silent() -> Self {
        Self {
            validate: false,
            mark_dirty: false,
            mark_touched: false,
        }
    }
}

/// A read-only view of the form state, handed to the rendering layer after
/// every mutation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FormSnapshot {
    /// Current value of every registered field.
    pub values: ValueMap,
    /// Current validation errors.
    pub errors: ErrorMap,
    /// Fields that have received and lost focus at least once.
    pub touched: BTreeSet<FieldPath>,
    /// Fields whose current value differs from their default.
    pub dirty: BTreeSet<FieldPath>,
    /// `true` if any field is dirty.
    pub is_dirty: bool,
    /// `true` if the error map is empty.
    pub is_valid: bool,
}

/// The form state ownership root.
///
/// Created at form initialization with the defaults recorded on each
/// registered rule, mutated on every field change or submit attempt, and
/// discarded when the form unmounts.
pub struct Form {
    registry: FieldRegistry,
    values: ValueMap,
    errors: ErrorMap,
    touched: BTreeSet<FieldPath>,
    dirty: BTreeSet<FieldPath>,
    options: FormOptions,
    schema: Option<Box<dyn SchemaValidator>>,
}

impl Form {
    /// Creates a form over the given registry, seeding every registered
    /// field with its default value.
    pub fn new(registry: FieldRegistry) -> Self {
        let values: ValueMap = registry
            .iter()
            .map(|(path, rule)| (path.clone(), rule.initial_value().clone()))
            .collect();
        Self {
            registry,
            values,
            errors: ErrorMap::new(),
            touched: BTreeSet::new(),
            dirty: BTreeSet::new(),
            options: FormOptions::default(),
            schema: None,
        }
    }

    /// Sets the form's behavior options.
    #[must_use]
    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches a whole-snapshot schema validator, consulted on every full
    /// validation pass.
    #[must_use]
    pub fn with_schema(mut self, schema: Box<dyn SchemaValidator>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Returns the field registry.
    pub const fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Returns the current value of every registered field.
    pub const fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Returns the current value at `path`.
    pub fn value(&self, path: &FieldPath) -> Option<&FormValue> {
        self.values.get(path)
    }

    /// Returns the current error map.
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the current error for `path`.
    pub fn error(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// Returns `true` if any field's value differs from its default.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns `true` if the error map is empty.
    ///
    /// Reflects the most recent validation work; a form that has never been
    /// validated reports valid until a pass says otherwise.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if `path` has been marked touched.
    pub fn is_touched(&self, path: &FieldPath) -> bool {
        self.touched.contains(path)
    }

    /// Returns the set of touched fields.
    pub const fn touched(&self) -> &BTreeSet<FieldPath> {
        &self.touched
    }

    /// Returns the set of dirty fields.
    pub const fn dirty(&self) -> &BTreeSet<FieldPath> {
        &self.dirty
    }

    /// Sets the value at `path`.
    ///
    /// Setting an unregistered path is a no-op: the misuse is logged and the
    /// form state is left untouched, so a stray write cannot poison the UI.
    ///
    /// With `opts.mark_dirty`, the dirty flag is recomputed from the
    /// default-value comparison: writing the default back clears it. With
    /// `opts.validate` (or mode `OnChange`) the field is re-validated and
    /// its error map entry updated in place.
    pub fn set_value(&mut self, path: &FieldPath, value: impl Into<FormValue>, opts: SetValueOpts) {
        if !self.registry.contains(path) {
            warn!(%path, "set_value on unregistered path ignored");
            return;
        }
        let value = value.into();
        debug!(%path, %value, "set value");
        self.values.insert(path.clone(), value);

        if opts.mark_dirty {
            self.recompute_dirty(path);
        }
        if opts.mark_touched {
            self.touched.insert(path.clone());
        }
        if opts.validate || self.options.mode == ValidateMode::OnChange {
            self.validate_field(path);
        }
    }

    /// Marks `path` touched. In `OnBlur` mode this also re-validates the
    /// field.
    pub fn mark_touched(&mut self, path: &FieldPath) {
        if !self.registry.contains(path) {
            warn!(%path, "mark_touched on unregistered path ignored");
            return;
        }
        self.touched.insert(path.clone());
        if self.options.mode == ValidateMode::OnBlur {
            self.validate_field(path);
        }
    }

    /// Re-validates a single field against its declarative rule, updating
    /// its entry in the error map.
    ///
    /// Schema validators only run during [`validate_all`](Self::validate_all);
    /// a per-field pass cannot re-evaluate a whole-snapshot schema.
    pub fn validate_field(&mut self, path: &FieldPath) -> Option<FieldError> {
        let outcome = validation::validate_field(&self.registry, &self.values, path);
        match &outcome {
            Some(error) => {
                self.errors.insert(path.clone(), error.clone());
            }
            None => {
                self.errors.remove(path);
            }
        }
        outcome
    }

    /// Runs a full validation pass (declarative rules plus the schema
    /// overlay), replacing the error map. Returns the new map.
    pub fn validate_all(&mut self) -> &ErrorMap {
        self.errors =
            validation::validate_all(&self.registry, &self.values, self.schema.as_deref());
        &self.errors
    }

    /// Submit-attempt entry point.
    ///
    /// Marks every registered field touched, runs a full validation pass,
    /// then invokes exactly one of the callbacks: `on_valid` with the value
    /// snapshot when the error map is empty, `on_invalid` with the error map
    /// otherwise. Neither branch is retried. Returns `true` when valid.
    pub fn handle_submit(
        &mut self,
        on_valid: impl FnOnce(&ValueMap),
        on_invalid: impl FnOnce(&ErrorMap),
    ) -> bool {
        let all_paths: Vec<FieldPath> = self.registry.paths().cloned().collect();
        self.touched.extend(all_paths);
        self.validate_all();
        if self.errors.is_empty() {
            debug!("submit accepted");
            on_valid(&self.values);
            true
        } else {
            debug!(error_count = self.errors.len(), "submit rejected");
            on_invalid(&self.errors);
            false
        }
    }

    /// Restores every field to its default value and clears the error map
    /// and the touched/dirty sets.
    pub fn reset(&mut self) {
        self.values = self
            .registry
            .iter()
            .map(|(path, rule)| (path.clone(), rule.initial_value().clone()))
            .collect();
        self.errors.clear();
        self.touched.clear();
        self.dirty.clear();
    }

    /// Produces a read-only snapshot of the current state.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors.clone(),
            touched: self.touched.clone(),
            dirty: self.dirty.clone(),
            is_dirty: self.is_dirty(),
            is_valid: self.is_valid(),
        }
    }

    fn recompute_dirty(&mut self, path: &FieldPath) {
        let differs = match (self.values.get(path), self.registry.initial(path)) {
            (Some(current), Some(initial)) => current != initial,
            _ => false,
        };
        if differs {
            self.dirty.insert(path.clone());
        } else {
            self.dirty.remove(path);
        }
    }

    // ── Field-array plumbing ───────────────────────────────────────────

    /// Registers a field and seeds its value with the rule's default.
    pub(crate) fn register_path(&mut self, path: FieldPath, rule: FieldRule) {
        let initial = rule.initial_value().clone();
        self.registry.register(path.clone(), rule);
        self.values.insert(path, initial);
    }

    /// Removes a field and every trace of it from the state.
    pub(crate) fn unregister_path(&mut self, path: &FieldPath) {
        self.registry.unregister(path);
        self.values.remove(path);
        self.errors.remove(path);
        self.touched.remove(path);
        self.dirty.remove(path);
    }

    /// Moves a field's rule and state from one path to another, used when
    /// array entries are renumbered after a removal.
    pub(crate) fn move_path(&mut self, from: &FieldPath, to: &FieldPath) {
        if let Some(rule) = self.registry.unregister(from) {
            self.registry.register(to.clone(), rule);
        }
        if let Some(value) = self.values.remove(from) {
            self.values.insert(to.clone(), value);
        }
        if let Some(error) = self.errors.remove(from) {
            self.errors.insert(to.clone(), error);
        }
        if self.touched.remove(from) {
            self.touched.insert(to.clone());
        }
        if self.dirty.remove(from) {
            self.dirty.insert(to.clone());
        }
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("registry", &self.registry)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("dirty", &self.dirty)
            .field("options", &self.options)
            .field("has_schema", &self.schema.is_some())
            .finish()
    }
}
