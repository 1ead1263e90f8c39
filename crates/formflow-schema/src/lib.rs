//! # formflow-schema
//!
//! Two interchangeable implementations of the engine's
//! [`SchemaValidator`](formflow_engine::schema::SchemaValidator) capability:
//!
//! - [`PatternSchema`](pattern::PatternSchema) - a flat, ordered table of
//!   per-path pattern rules
//! - [`ObjectSchema`](object::ObjectSchema) - a declarative object schema
//!   built from typed per-field schemas
//!
//! Both see the whole value snapshot and return the same flat issue list,
//! so a form can swap one for the other without touching anything else.

pub mod object;
pub mod pattern;

pub use object::{boolean, integer, string, FieldSchema, ObjectSchema};
pub use pattern::PatternSchema;

use once_cell::sync::Lazy;
use regex::Regex;

/// Shared email shape used by both DSLs' `email` rules.
pub(crate) static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$").expect("email pattern compiles")
});
