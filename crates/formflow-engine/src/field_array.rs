//! Dynamic repeated field groups.
//!
//! A [`FieldArray`] controls an ordered, resizable list of entries under a
//! common path prefix (`phone_list.0.number`, `phone_list.1.number`, ...).
//! Entry identity is arena-style: every appended entry gets a fresh id from
//! a monotonic counter and keeps it for life, while the visible order is a
//! separate index list. Removal renumbers paths but never reuses or
//! reassigns an id, so UI keys stay collision-free across reorders.

use tracing::debug;

use formflow_core::error::{FormError, FormResult};
use formflow_core::path::FieldPath;
use formflow_core::value::FormValue;

use crate::form::{Form, SetValueOpts};
use crate::rules::FieldRule;

/// Stable identity of one array entry.
///
/// Minted once on `append` from a monotonically increasing counter and
/// never reused, even after the entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Returns the raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Controller for a repeated field group.
///
/// The controller itself is index-agnostic: any entry can be removed. A
/// minimum length can be configured for consumers whose UI protects the
/// first entry (or the first N) from removal; the default imposes no floor.
///
/// # Examples
///
/// ```
/// use formflow_core::path::FieldPath;
/// use formflow_engine::field_array::FieldArray;
/// use formflow_engine::form::Form;
/// use formflow_engine::registry::FieldRegistry;
/// use formflow_engine::rules::FieldRule;
///
/// let mut form = Form::new(FieldRegistry::new());
/// let mut phones = FieldArray::new(FieldPath::root("phone_list"))
///     .with_field("number", FieldRule::new().initial(""));
/// let first = phones.append(&mut form);
/// phones.append(&mut form);
/// assert_eq!(phones.len(), 2);
/// assert_eq!(phones.id_at(0), Some(first));
/// ```
#[derive(Debug)]
pub struct FieldArray {
    prefix: FieldPath,
    template: Vec<(String, FieldRule)>,
    min_len: usize,
    next_id: u64,
    order: Vec<EntryId>,
}

impl FieldArray {
    /// Creates an empty controller for entries under `prefix`.
    pub const fn new(prefix: FieldPath) -> Self {
        Self {
            prefix,
            template: Vec::new(),
            min_len: 0,
            next_id: 0,
            order: Vec::new(),
        }
    }

    /// Adds a sub-field to the entry template. Each appended entry gets this
    /// rule registered at `prefix.<index>.<name>`.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.template.push((name.into(), rule));
        self
    }

    /// Sets the minimum number of entries `remove` will preserve.
    ///
    /// Whether the first entry of a group is protected is a UI policy, not
    /// a controller invariant; consumers opt in here.
    #[must_use]
    pub const fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Returns the path prefix this controller manages.
    pub const fn prefix(&self) -> &FieldPath {
        &self.prefix
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the entry ids in visible order. These are the stable keys
    /// the rendering layer should use for list reconciliation.
    pub fn entries(&self) -> &[EntryId] {
        &self.order
    }

    /// Returns the id of the entry at `index`.
    pub fn id_at(&self, index: usize) -> Option<EntryId> {
        self.order.get(index).copied()
    }

    /// Returns the full path of `field` within the entry at `index`.
    pub fn field_path(&self, index: usize, field: &str) -> FieldPath {
        self.prefix.clone().index(index).key(field)
    }

    /// Appends an entry at the tail with the template's default values.
    ///
    /// Mints a fresh id and registers the template rules on the form;
    /// existing entries and their ids are untouched.
    pub fn append(&mut self, form: &mut Form) -> EntryId {
        self.append_with(form, Vec::new())
    }

    /// Appends an entry at the tail, overriding the listed sub-field values.
    ///
    /// Overrides that differ from the template default mark the new paths
    /// dirty, like any other user edit.
    pub fn append_with(
        &mut self,
        form: &mut Form,
        overrides: Vec<(String, FormValue)>,
    ) -> EntryId {
        let index = self.order.len();
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.order.push(id);

        for (name, rule) in &self.template {
            form.register_path(self.field_path(index, name), rule.clone());
        }
        for (name, value) in overrides {
            form.set_value(&self.field_path(index, &name), value, SetValueOpts::default());
        }
        debug!(prefix = %self.prefix, index, %id, "appended array entry");
        id
    }

    /// Removes the entry at `index`.
    ///
    /// Every later entry shifts down one position: its paths are renumbered
    /// while its id and state (value, error, touched, dirty) move with it.
    /// Fails without touching the form when `index` is out of range or the
    /// array is at its configured minimum length.
    pub fn remove(&mut self, form: &mut Form, index: usize) -> FormResult<()> {
        let len = self.order.len();
        if index >= len {
            return Err(FormError::IndexOutOfRange { index, len });
        }
        if len <= self.min_len {
            return Err(FormError::MinLenReached {
                min_len: self.min_len,
            });
        }

        for (name, _) in &self.template {
            form.unregister_path(&self.field_path(index, name));
        }
        for j in index + 1..len {
            for (name, _) in &self.template {
                form.move_path(&self.field_path(j, name), &self.field_path(j - 1, name));
            }
        }
        let id = self.order.remove(index);
        debug!(prefix = %self.prefix, index, %id, "removed array entry");
        Ok(())
    }
}
