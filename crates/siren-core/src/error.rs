//! # Error Types
//!
//! The flattener has exactly one error of its own: a schema whose root is
//! not an object. Failures of the introspection step are carried through
//! unchanged as a boxed source so callers can downcast to the concrete
//! error of their schema library.
//!
//! Unsupported leaf types are not errors; they never reach this module.

use thiserror::Error;

use crate::description::SchemaType;

/// Error returned by [`flatten`](crate::flatten()).
#[derive(Error, Debug)]
pub enum FlattenError {
    /// The introspected root of the schema is not an object.
    #[error("Root element must be an object")]
    InvalidRoot {
        /// Type tag found at the root.
        found: SchemaType,
    },

    /// The schema could not be introspected.
    #[error("schema introspection failed: {0}")]
    Describe(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl FlattenError {
    /// Returns true if this is the non-object root error.
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, FlattenError::InvalidRoot { .. })
    }

    /// Returns the introspection error if this wraps one of type `E`.
    pub fn describe_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FlattenError::Describe(inner) => inner.downcast_ref::<E>(),
            FlattenError::InvalidRoot { .. } => None,
        }
    }
}
