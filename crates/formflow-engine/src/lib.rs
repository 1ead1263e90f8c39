//! # formflow-engine
//!
//! The form engine: a field registry with declarative validation rules, a
//! synchronous validation pipeline, dynamic field arrays with stable entry
//! identity, and submit handling over a read-only snapshot.
//!
//! All mutation happens synchronously on the calling thread in response to
//! discrete UI events; the engine holds no locks and spawns nothing.
//!
//! ## Modules
//!
//! - [`rules`] - Declarative per-field validation rules
//! - [`registry`] - The field registry (path -> rule + default value)
//! - [`validation`] - The validation pipeline
//! - [`form`] - The [`Form`](form::Form) ownership root and snapshots
//! - [`field_array`] - Dynamic repeated field groups
//! - [`schema`] - The pluggable whole-snapshot schema validator capability
//! - [`options`] - Form behavior options (revalidation mode)

pub mod field_array;
pub mod form;
pub mod options;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod validation;

// Re-export the most commonly used types at the crate root.
pub use field_array::{EntryId, FieldArray};
pub use form::{Form, FormSnapshot, SetValueOpts};
pub use options::{FormOptions, ValidateMode};
pub use registry::{FieldBinding, FieldRegistry};
pub use rules::FieldRule;
pub use schema::SchemaValidator;
