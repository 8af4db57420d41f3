//! # Schema Description Tree
//!
//! The structural introspection of a validation schema: every node is either
//! an object with ordered, named children or a leaf with a primitive type.
//! Leaves optionally carry human-readable text and a fixed permitted value.
//!
//! Child order is declaration order and is significant: it becomes the order
//! of the generated form fields.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive type of a schema leaf.
///
/// Only `String`, `Number` and `Boolean` have a presentation mapping; the
/// rest are described faithfully and dropped by the flattener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Text.
    String,
    /// Integer or floating point number.
    Number,
    /// True/false.
    Boolean,
    /// Unconstrained value.
    Any,
    /// Ordered list of values.
    Array,
    /// Calendar date, time, or timestamp.
    Date,
    /// Encoded binary content.
    Binary,
    /// One of several alternative schemas.
    Alternatives,
    /// The null value.
    Null,
}

impl PrimitiveType {
    /// Lowercase type tag, e.g. `"string"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Any => "any",
            PrimitiveType::Array => "array",
            PrimitiveType::Date => "date",
            PrimitiveType::Binary => "binary",
            PrimitiveType::Alternatives => "alternatives",
            PrimitiveType::Null => "null",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag of any node in the tree: `object` or a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// A record with named children.
    Object,
    /// A leaf.
    Primitive(PrimitiveType),
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Object => f.write_str("object"),
            SchemaType::Primitive(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// A fixed permitted value of a leaf.
///
/// Serializes as the bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// A boolean literal.
    Boolean(bool),
    /// A numeric literal.
    Number(serde_json::Number),
    /// A string literal.
    String(String),
}

impl LiteralValue {
    /// Convert a JSON scalar. Returns `None` for null, arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(LiteralValue::Boolean(*b)),
            Value::Number(n) => Some(LiteralValue::Number(n.clone())),
            Value::String(s) => Some(LiteralValue::String(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The primitive type a schema consisting only of this literal has.
    pub fn primitive(&self) -> PrimitiveType {
        match self {
            LiteralValue::Boolean(_) => PrimitiveType::Boolean,
            LiteralValue::Number(_) => PrimitiveType::Number,
            LiteralValue::String(_) => PrimitiveType::String,
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::String(s)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Boolean(b)
    }
}

impl From<i64> for LiteralValue {
    fn from(n: i64) -> Self {
        LiteralValue::Number(n.into())
    }
}

impl From<u64> for LiteralValue {
    fn from(n: u64) -> Self {
        LiteralValue::Number(n.into())
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::String(s) => f.write_str(s),
        }
    }
}

/// Named children of an object node, in declaration order.
///
/// Inserting an existing key replaces its description in place without
/// moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children {
    entries: IndexMap<String, SchemaDescription>,
}

impl Children {
    /// Create an empty set of children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a child. Returns the previous description, if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        description: SchemaDescription,
    ) -> Option<SchemaDescription> {
        self.entries.insert(key.into(), description)
    }

    /// Look up a child by key.
    pub fn get(&self, key: &str) -> Option<&SchemaDescription> {
        self.entries.get(key)
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Child keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Children in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaDescription)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }
}

impl<K: Into<String>> FromIterator<(K, SchemaDescription)> for Children {
    fn from_iter<I: IntoIterator<Item = (K, SchemaDescription)>>(iter: I) -> Self {
        Children {
            entries: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}

/// A node of the schema description tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDescription {
    /// A record type. Never becomes a form field itself.
    Object {
        /// Named children in declaration order.
        children: Children,
        /// Human-readable description.
        description: Option<String>,
    },
    /// A primitive-typed value.
    Leaf {
        /// Declared primitive type.
        kind: PrimitiveType,
        /// Human-readable description, copied to the field title.
        description: Option<String>,
        /// The only permitted value, if the schema fixes one.
        value: Option<LiteralValue>,
    },
}

impl SchemaDescription {
    /// An object with no children. Add children with [`child`](Self::child).
    pub fn object() -> Self {
        SchemaDescription::Object {
            children: Children::new(),
            description: None,
        }
    }

    /// A leaf of the given type with no description or value.
    pub fn leaf(kind: PrimitiveType) -> Self {
        SchemaDescription::Leaf {
            kind,
            description: None,
            value: None,
        }
    }

    /// A `string` leaf.
    pub fn string() -> Self {
        Self::leaf(PrimitiveType::String)
    }

    /// A `number` leaf.
    pub fn number() -> Self {
        Self::leaf(PrimitiveType::Number)
    }

    /// A `boolean` leaf.
    pub fn boolean() -> Self {
        Self::leaf(PrimitiveType::Boolean)
    }

    /// A leaf whose only permitted value is `value`. The primitive type is
    /// inferred from the literal.
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        let value = value.into();
        SchemaDescription::Leaf {
            kind: value.primitive(),
            description: None,
            value: Some(value),
        }
    }

    /// Append (or replace) a child. Has no effect on leaves.
    pub fn child(mut self, key: impl Into<String>, description: SchemaDescription) -> Self {
        if let SchemaDescription::Object { children, .. } = &mut self {
            children.insert(key, description);
        }
        self
    }

    /// Set the human-readable description.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            SchemaDescription::Object { description, .. }
            | SchemaDescription::Leaf { description, .. } => *description = Some(text.into()),
        }
        self
    }

    /// Fix the permitted value of a leaf. Has no effect on objects.
    pub fn with_value(mut self, literal: impl Into<LiteralValue>) -> Self {
        if let SchemaDescription::Leaf { value, .. } = &mut self {
            *value = Some(literal.into());
        }
        self
    }

    /// Type tag of this node.
    pub fn schema_type(&self) -> SchemaType {
        match self {
            SchemaDescription::Object { .. } => SchemaType::Object,
            SchemaDescription::Leaf { kind, .. } => SchemaType::Primitive(*kind),
        }
    }

    /// Human-readable description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaDescription::Object { description, .. }
            | SchemaDescription::Leaf { description, .. } => description.as_deref(),
        }
    }

    /// Children of an object node; `None` for leaves.
    pub fn children(&self) -> Option<&Children> {
        match self {
            SchemaDescription::Object { children, .. } => Some(children),
            SchemaDescription::Leaf { .. } => None,
        }
    }

    /// Fixed value of a leaf; `None` for objects and unconstrained leaves.
    pub fn value(&self) -> Option<&LiteralValue> {
        match self {
            SchemaDescription::Object { .. } => None,
            SchemaDescription::Leaf { value, .. } => value.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_children_keep_declaration_order() {
        let obj = SchemaDescription::object()
            .child("zeta", SchemaDescription::string())
            .child("alpha", SchemaDescription::number())
            .child("mid", SchemaDescription::boolean());
        let keys: Vec<&str> = obj.children().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_reinserting_a_key_replaces_in_place() {
        let mut children = Children::new();
        children.insert("a", SchemaDescription::string());
        children.insert("b", SchemaDescription::string());
        let previous = children.insert("a", SchemaDescription::number());

        assert_eq!(previous, Some(SchemaDescription::string()));
        assert_eq!(children.len(), 2);
        let keys: Vec<&str> = children.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(children.get("a"), Some(&SchemaDescription::number()));
    }

    #[test]
    fn test_literal_infers_primitive() {
        assert_eq!(
            SchemaDescription::literal("x").schema_type(),
            SchemaType::Primitive(PrimitiveType::String)
        );
        assert_eq!(
            SchemaDescription::literal(3i64).schema_type(),
            SchemaType::Primitive(PrimitiveType::Number)
        );
        assert_eq!(
            SchemaDescription::literal(true).schema_type(),
            SchemaType::Primitive(PrimitiveType::Boolean)
        );
        assert_eq!(
            SchemaDescription::literal("x").value(),
            Some(&LiteralValue::from("x"))
        );
    }

    #[test]
    fn test_builders_ignore_inapplicable_settings() {
        let leaf = SchemaDescription::string().child("nope", SchemaDescription::number());
        assert!(leaf.children().is_none());

        let obj = SchemaDescription::object().with_value("ignored");
        assert!(obj.value().is_none());
    }

    #[test]
    fn test_schema_type_display_is_lowercase() {
        assert_eq!(SchemaType::Object.to_string(), "object");
        assert_eq!(
            SchemaType::Primitive(PrimitiveType::Alternatives).to_string(),
            "alternatives"
        );
    }

    #[test]
    fn test_literal_from_json_scalars_only() {
        assert_eq!(
            LiteralValue::from_json(&json!("s")),
            Some(LiteralValue::String("s".into()))
        );
        assert_eq!(
            LiteralValue::from_json(&json!(1.5)),
            Some(LiteralValue::Number(serde_json::Number::from_f64(1.5).unwrap()))
        );
        assert_eq!(LiteralValue::from_json(&json!(null)), None);
        assert_eq!(LiteralValue::from_json(&json!([1])), None);
        assert_eq!(LiteralValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_literal_serializes_as_bare_scalar() {
        assert_eq!(serde_json::to_value(LiteralValue::from(7i64)).unwrap(), json!(7));
        assert_eq!(serde_json::to_value(LiteralValue::from(false)).unwrap(), json!(false));
        assert_eq!(serde_json::to_value(LiteralValue::from("v")).unwrap(), json!("v"));
    }
}
