//! # Introspection Errors
//!
//! Every error names where in the document it happened: a file path for
//! load failures, a JSON Pointer for problems inside the schema.

use thiserror::Error;

/// Error while reading or introspecting a JSON Schema document.
#[derive(Error, Debug)]
pub enum SchemaDescribeError {
    /// The schema file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path of the file.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// Schema text is not valid JSON or YAML.
    #[error("invalid {format}: {reason}")]
    Parse {
        /// `"JSON"` or `"YAML"`.
        format: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The document is not a well-formed JSON Schema.
    #[error("invalid schema: {reason}")]
    InvalidSchema {
        /// Message from the schema compiler.
        reason: String,
    },

    /// A node that must be a schema is neither an object nor a boolean.
    #[error("expected a schema object at '{pointer}'")]
    NotASchema {
        /// JSON Pointer of the node.
        pointer: String,
    },

    /// `type` names something that is not a JSON Schema type.
    #[error("unknown schema type {type_name} at '{pointer}'")]
    UnknownType {
        /// JSON Pointer of the node.
        pointer: String,
        /// The offending `type` value.
        type_name: String,
    },

    /// A `$ref` could not be resolved inside the document.
    #[error("unresolved reference '{reference}' at '{pointer}'")]
    UnresolvedRef {
        /// JSON Pointer of the referencing node.
        pointer: String,
        /// The `$ref` value.
        reference: String,
    },

    /// A `$ref` chain loops back on itself or exceeds the configured depth.
    #[error("reference cycle through '{reference}' at '{pointer}'")]
    RefCycle {
        /// JSON Pointer of the referencing node.
        pointer: String,
        /// The `$ref` value that closed the cycle.
        reference: String,
    },
}
