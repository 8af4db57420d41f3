//! # Introspection Options
//!
//! Knobs for reading a JSON Schema document. Serde-enabled so a host
//! application can embed them in its own configuration file.

use serde::{Deserialize, Serialize};

/// Default limit on nested `$ref` expansion.
pub const DEFAULT_MAX_REF_DEPTH: usize = 64;

/// JSON Schema draft used for well-formedness checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaDraft {
    /// Draft 4.
    Draft4,
    /// Draft 6.
    Draft6,
    /// Draft 7.
    Draft7,
    /// Draft 2019-09.
    Draft201909,
    /// Draft 2020-12.
    #[default]
    Draft202012,
}

impl From<SchemaDraft> for jsonschema::Draft {
    fn from(draft: SchemaDraft) -> Self {
        match draft {
            SchemaDraft::Draft4 => jsonschema::Draft::Draft4,
            SchemaDraft::Draft6 => jsonschema::Draft::Draft6,
            SchemaDraft::Draft7 => jsonschema::Draft::Draft7,
            SchemaDraft::Draft201909 => jsonschema::Draft::Draft201909,
            SchemaDraft::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

/// How a [`JsonSchema`](crate::JsonSchema) is introspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeOptions {
    /// Compile the document with `jsonschema` before introspecting it and
    /// reject it if compilation fails.
    pub validate_schema: bool,
    /// Draft used for that compilation.
    pub draft: SchemaDraft,
    /// Maximum number of nested `$ref` expansions along one path.
    pub max_depth: usize,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            validate_schema: true,
            draft: SchemaDraft::default(),
            max_depth: DEFAULT_MAX_REF_DEPTH,
        }
    }
}

impl DescribeOptions {
    /// Enable or disable well-formedness checking.
    pub fn with_validation(mut self, validate_schema: bool) -> Self {
        self.validate_schema = validate_schema;
        self
    }

    /// Select the draft for well-formedness checking.
    pub fn with_draft(mut self, draft: SchemaDraft) -> Self {
        self.draft = draft;
        self
    }

    /// Limit nested `$ref` expansion.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
