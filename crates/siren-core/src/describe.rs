//! # Schema Introspection Seam
//!
//! The flattener needs exactly one capability from a schema library: turning
//! a schema into its [`SchemaDescription`]. Anything that can do that
//! implements [`Describe`].

use std::convert::Infallible;

use crate::description::SchemaDescription;

/// A schema that can be introspected into a description tree.
pub trait Describe {
    /// Error raised when the schema cannot be introspected.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce the description tree of this schema.
    fn describe(&self) -> Result<SchemaDescription, Self::Error>;
}

/// An already-built description describes itself.
impl Describe for SchemaDescription {
    type Error = Infallible;

    fn describe(&self) -> Result<SchemaDescription, Infallible> {
        Ok(self.clone())
    }
}
