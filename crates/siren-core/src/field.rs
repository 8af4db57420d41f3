//! # Form Field Descriptors
//!
//! The output of flattening: one [`FieldDescriptor`] per renderable leaf, in
//! the JSON shape of a Siren action field.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::description::{LiteralValue, PrimitiveType};

/// HTML5 input type a field is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationType {
    /// `<input type="checkbox">`
    Checkbox,
    /// `<input type="number">`
    Number,
    /// `<input type="text">`
    Text,
}

impl PresentationType {
    /// Presentation type for a schema primitive.
    ///
    /// | schema primitive | presentation type |
    /// |---|---|
    /// | boolean | checkbox |
    /// | number  | number   |
    /// | string  | text     |
    ///
    /// Every other primitive is unsupported and returns `None`; the
    /// flattener drops such leaves.
    pub fn for_primitive(primitive: PrimitiveType) -> Option<Self> {
        match primitive {
            PrimitiveType::Boolean => Some(PresentationType::Checkbox),
            PrimitiveType::Number => Some(PresentationType::Number),
            PrimitiveType::String => Some(PresentationType::Text),
            PrimitiveType::Any
            | PrimitiveType::Array
            | PrimitiveType::Date
            | PrimitiveType::Binary
            | PrimitiveType::Alternatives
            | PrimitiveType::Null => None,
        }
    }

    /// The HTML `type` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationType::Checkbox => "checkbox",
            PresentationType::Number => "number",
            PresentationType::Text => "text",
        }
    }
}

impl fmt::Display for PresentationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Qualified field name, e.g. `outer[inner][leaf]`.
    pub name: String,
    /// Input type.
    #[serde(rename = "type")]
    pub kind: PresentationType,
    /// Schema description of the leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fixed value of the leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<LiteralValue>,
}

impl FieldDescriptor {
    /// A field with no title or value.
    pub fn new(name: impl Into<String>, kind: PresentationType) -> Self {
        Self {
            name: name.into(),
            kind,
            title: None,
            value: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the fixed value.
    pub fn with_value(mut self, value: impl Into<LiteralValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}
