//! # siren-schema — JSON Schema Introspection
//!
//! Reads JSON Schema documents (JSON or YAML) into the
//! [`SchemaDescription`](siren_core::SchemaDescription) tree that
//! `siren-core` flattens into form fields.
//!
//! ## Usage
//!
//! - [`JsonSchema`] — a parsed document; implements
//!   [`Describe`](siren_core::Describe) and offers [`JsonSchema::fields`].
//! - [`flatten_json`] — one-shot flattening of a `serde_json::Value`.
//! - [`DescribeOptions`] — well-formedness checking, draft, `$ref` depth.
//!
//! ## Crate Policy
//!
//! - Depends only on `siren-core` internally.
//! - Never performs network requests: external `$ref`s are rejected.
//! - Property order of the document is field order; `serde_json` is built
//!   with `preserve_order`.

pub mod describe;
pub mod error;
mod introspect;
pub mod options;

pub use describe::{flatten_json, JsonSchema};
pub use error::SchemaDescribeError;
pub use options::{DescribeOptions, SchemaDraft, DEFAULT_MAX_REF_DEPTH};
