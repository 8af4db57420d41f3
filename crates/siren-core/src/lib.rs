//! # siren-core — Schema Flattening for HTML5 Forms
//!
//! Turns the description of an object-shaped validation schema into the flat,
//! ordered list of form fields a Siren action carries. Nested objects become
//! bracket-named fields (`outer[inner][leaf]`) and each leaf's primitive type
//! is mapped onto an HTML5 input type.
//!
//! ## Key Types
//!
//! - [`SchemaDescription`] — the introspected schema tree, a tagged union of
//!   objects (ordered children) and leaves (primitive type, description,
//!   optional fixed value).
//! - [`FieldDescriptor`] — one renderable form field. Serializes to the Siren
//!   field shape; absent `title`/`value` are omitted, never `null`.
//! - [`PresentationType`] — `text`, `number`, `checkbox`. The mapping from
//!   [`PrimitiveType`] lives in [`PresentationType::for_primitive`] and is
//!   the single source of truth for supported leaf types.
//! - [`Describe`] — the seam to whatever library introspects a schema.
//!
//! ## Flattening
//!
//! [`flatten()`] walks the tree depth-first in declaration order. A root that
//! is not an object fails with [`FlattenError::InvalidRoot`]; leaves whose
//! type has no presentation mapping are dropped without error.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `siren-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Flattening is pure: no I/O, no shared state. Only `tracing` events.

pub mod describe;
pub mod description;
pub mod error;
pub mod field;
pub mod flatten;

// Re-export primary types for ergonomic imports.
pub use describe::Describe;
pub use description::{Children, LiteralValue, PrimitiveType, SchemaDescription, SchemaType};
pub use error::FlattenError;
pub use field::{FieldDescriptor, PresentationType};
pub use flatten::{flatten, flatten_description, qualified_name, SchemaFlattener};
