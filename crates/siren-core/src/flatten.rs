//! # Schema Flattener
//!
//! Depth-first, pre-order walk over an object schema that emits one
//! [`FieldDescriptor`] per supported leaf. Nested object keys are folded into
//! the field name in bracket notation: a leaf `c` under `a` and `b` is named
//! `a[b][c]`, a top-level leaf just `c`.
//!
//! Each child's fields are appended in full before the next sibling is
//! visited, so output order is declaration order at every level.

use tracing::{debug, trace};

use crate::describe::Describe;
use crate::description::{Children, SchemaDescription};
use crate::error::FlattenError;
use crate::field::{FieldDescriptor, PresentationType};

/// Flattens object schemas into form fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaFlattener;

impl SchemaFlattener {
    /// Create a flattener.
    pub fn new() -> Self {
        SchemaFlattener
    }

    /// Introspect `schema` and flatten its description.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::Describe`] if introspection fails and
    /// [`FlattenError::InvalidRoot`] if the root is not an object.
    pub fn flatten<S>(&self, schema: &S) -> Result<Vec<FieldDescriptor>, FlattenError>
    where
        S: Describe + ?Sized,
    {
        let description = schema
            .describe()
            .map_err(|e| FlattenError::Describe(Box::new(e)))?;
        self.flatten_description(&description)
    }

    /// Flatten an already-introspected description tree.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::InvalidRoot`] if the root is not an object.
    pub fn flatten_description(
        &self,
        description: &SchemaDescription,
    ) -> Result<Vec<FieldDescriptor>, FlattenError> {
        let SchemaDescription::Object { children, .. } = description else {
            return Err(FlattenError::InvalidRoot {
                found: description.schema_type(),
            });
        };

        let mut fields = Vec::new();
        collect_children(children, None, &mut fields);
        Ok(fields)
    }
}

/// Introspect `schema` and flatten it into form fields.
///
/// See [`SchemaFlattener::flatten`].
pub fn flatten<S>(schema: &S) -> Result<Vec<FieldDescriptor>, FlattenError>
where
    S: Describe + ?Sized,
{
    SchemaFlattener.flatten(schema)
}

/// Flatten an already-introspected description tree.
///
/// See [`SchemaFlattener::flatten_description`].
pub fn flatten_description(
    description: &SchemaDescription,
) -> Result<Vec<FieldDescriptor>, FlattenError> {
    SchemaFlattener.flatten_description(description)
}

/// Name of child `key` under `prefix`: `prefix[key]`, or `key` at top level.
///
/// An empty prefix counts as top level.
pub fn qualified_name(prefix: Option<&str>, key: &str) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{prefix}[{key}]"),
        None => key.to_string(),
    }
}

fn collect_children(children: &Children, prefix: Option<&str>, out: &mut Vec<FieldDescriptor>) {
    for (key, child) in children.iter() {
        let name = qualified_name(prefix, key);
        collect_node(child, name, out);
    }
}

fn collect_node(node: &SchemaDescription, name: String, out: &mut Vec<FieldDescriptor>) {
    match node {
        SchemaDescription::Object { children, .. } => {
            collect_children(children, Some(&name), out);
        }
        SchemaDescription::Leaf {
            kind,
            description,
            value,
        } => match PresentationType::for_primitive(*kind) {
            Some(presentation) => {
                trace!(field = %name, kind = %presentation, "emitting form field");
                out.push(FieldDescriptor {
                    name,
                    kind: presentation,
                    title: description.clone(),
                    value: value.clone(),
                });
            }
            None => {
                debug!(field = %name, primitive = %kind, "skipping field with unsupported schema type");
            }
        },
    }
}
