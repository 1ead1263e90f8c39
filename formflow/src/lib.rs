//! # formflow
//!
//! A form-state and validation engine for Rust UIs.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `formflow` to get the whole engine, or depend
//! on individual crates for finer-grained control.

/// Core types: field paths, values, and error types.
pub use formflow_core as core;

/// The engine: field registry, validation pipeline, forms, field arrays.
#[cfg(feature = "engine")]
pub use formflow_engine as engine;

/// Schema validators: the pattern-table and object-schema DSLs.
#[cfg(feature = "schema")]
pub use formflow_schema as schema;

/// The most commonly used names, for glob import.
pub mod prelude {
    pub use formflow_core::error::{ErrorMap, FieldError, FormError, FormResult};
    pub use formflow_core::path::FieldPath;
    pub use formflow_core::value::{FormValue, ValueMap};

    #[cfg(feature = "engine")]
    pub use formflow_engine::{
        EntryId, FieldArray, FieldRegistry, FieldRule, Form, FormOptions, FormSnapshot,
        SchemaValidator, SetValueOpts, ValidateMode,
    };

    #[cfg(feature = "schema")]
    pub use formflow_schema::{boolean, integer, string, ObjectSchema, PatternSchema};
}
