//! # JSON Schema Documents
//!
//! [`JsonSchema`] holds a parsed schema document and implements
//! [`Describe`], so it can be handed straight to the flattener.
//!
//! ## Well-formedness
//!
//! Unless disabled in [`DescribeOptions`], the document is compiled with the
//! `jsonschema` crate before introspection. Compilation resolves `$ref`s
//! through a retriever that refuses every external URI, so describing a
//! schema never touches the network or the filesystem.

use std::path::Path;

use jsonschema::{Retrieve, Uri};
use serde_json::Value;
use tracing::debug;

use siren_core::{Describe, FieldDescriptor, FlattenError, SchemaDescription, SchemaFlattener};

use crate::error::SchemaDescribeError;
use crate::introspect::Introspector;
use crate::options::DescribeOptions;

/// Retriever that resolves nothing. Only in-document references are allowed.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema '{}' is not retrieved", uri.as_str()).into())
    }
}

/// A JSON Schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchema {
    document: Value,
    options: DescribeOptions,
}

impl JsonSchema {
    /// Wrap a parsed document with default options.
    pub fn new(document: Value) -> Self {
        Self {
            document,
            options: DescribeOptions::default(),
        }
    }

    /// Replace the introspection options.
    pub fn with_options(mut self, options: DescribeOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaDescribeError> {
        let document = serde_json::from_str(text).map_err(|e| SchemaDescribeError::Parse {
            format: "JSON",
            reason: e.to_string(),
        })?;
        Ok(Self::new(document))
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaDescribeError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| SchemaDescribeError::Parse {
                format: "YAML",
                reason: e.to_string(),
            })?;
        // Mapping order survives the conversion; it becomes field order.
        let document = serde_json::to_value(&yaml).map_err(|e| SchemaDescribeError::Parse {
            format: "YAML",
            reason: e.to_string(),
        })?;
        Ok(Self::new(document))
    }

    /// Load a schema file.
    ///
    /// `.yaml`/`.yml` files are read as YAML, everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SchemaDescribeError::DocumentLoadError` if the file cannot be
    /// read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaDescribeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaDescribeError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parsed = match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        };

        parsed.map_err(|e| SchemaDescribeError::DocumentLoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// The parsed document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The introspection options.
    pub fn options(&self) -> &DescribeOptions {
        &self.options
    }

    /// Compile the document with `jsonschema` to check it is a valid schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaDescribeError::InvalidSchema` with the compiler's
    /// message if compilation fails.
    pub fn check_well_formed(&self) -> Result<(), SchemaDescribeError> {
        let mut opts = jsonschema::options();
        opts.with_draft(self.options.draft.into());
        opts.with_retriever(OfflineRetriever);
        opts.build(&self.document)
            .map(|_| ())
            .map_err(|e| SchemaDescribeError::InvalidSchema {
                reason: e.to_string(),
            })
    }

    /// Introspect and flatten this schema into form fields.
    ///
    /// # Errors
    ///
    /// Returns `FlattenError::Describe` wrapping a [`SchemaDescribeError`]
    /// if the document cannot be introspected, and
    /// `FlattenError::InvalidRoot` if its root is not an object.
    pub fn fields(&self) -> Result<Vec<FieldDescriptor>, FlattenError> {
        SchemaFlattener::new().flatten(self)
    }
}

impl Describe for JsonSchema {
    type Error = SchemaDescribeError;

    fn describe(&self) -> Result<SchemaDescription, SchemaDescribeError> {
        if self.options.validate_schema {
            self.check_well_formed()?;
        } else {
            debug!("schema well-formedness check disabled");
        }
        Introspector::new(&self.document, &self.options).describe_root()
    }
}

/// Introspect and flatten a JSON Schema document with default options.
///
/// # Errors
///
/// See [`JsonSchema::fields`].
pub fn flatten_json(document: &Value) -> Result<Vec<FieldDescriptor>, FlattenError> {
    JsonSchema::new(document.clone()).fields()
}
