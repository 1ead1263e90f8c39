//! # formflow-core
//!
//! Foundation types for the formflow form engine. This crate has no internal
//! dependencies and provides the building blocks used by every other crate.
//!
//! ## Modules
//!
//! - [`path`] - Typed field paths (`socials.twitter`, `phone_list.0.number`)
//! - [`value`] - The `FormValue` enum and value-map aliases
//! - [`error`] - Error types and result aliases
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod path;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{ErrorMap, FieldError, FormError, FormResult, SchemaIssue, SchemaValidationError};
pub use path::{FieldPath, PathSegment};
pub use value::{FormValue, ValueMap};
