//! # JSON Schema Introspection
//!
//! Walks a JSON Schema document and builds the [`SchemaDescription`] tree.
//!
//! ## Type Resolution
//!
//! | schema | description |
//! |---|---|
//! | `type: object` (or `properties` without `type`) | object, children from `properties` in document order |
//! | `type: string` | `string`; `date` for `format` date/date-time/time; `binary` for `contentEncoding: base64` |
//! | `type: number` / `integer` | `number` |
//! | `type: boolean` / `array` / `null` | same-named primitive |
//! | `type: [..]` | `null` members dropped; one left is used as above, several are `alternatives` |
//! | `anyOf` / `oneOf` without `type` | `alternatives` |
//! | `const` or single-value `enum` without `type` | primitive of the literal |
//! | `true` / `false` / anything else | `any` |
//!
//! Local `$ref`s (`#/...`) are expanded in place. A `description` next to
//! the `$ref` wins over the target's.

use serde_json::{Map, Value};
use tracing::debug;

use siren_core::{Children, LiteralValue, PrimitiveType, SchemaDescription};

use crate::error::SchemaDescribeError;
use crate::options::DescribeOptions;

/// Builds description trees for one document.
pub(crate) struct Introspector<'a> {
    root: &'a Value,
    max_depth: usize,
    /// `$ref`s currently being expanded, outermost first.
    ref_stack: Vec<String>,
}

impl<'a> Introspector<'a> {
    pub(crate) fn new(root: &'a Value, options: &DescribeOptions) -> Self {
        Self {
            root,
            max_depth: options.max_depth,
            ref_stack: Vec::new(),
        }
    }

    /// Describe the whole document.
    pub(crate) fn describe_root(&mut self) -> Result<SchemaDescription, SchemaDescribeError> {
        let root = self.root;
        self.describe_node(root, "")
    }

    fn describe_node(
        &mut self,
        node: &'a Value,
        pointer: &str,
    ) -> Result<SchemaDescription, SchemaDescribeError> {
        let map = match node {
            Value::Object(map) => map,
            Value::Bool(_) => return Ok(SchemaDescription::leaf(PrimitiveType::Any)),
            _ => {
                return Err(SchemaDescribeError::NotASchema {
                    pointer: pointer.to_string(),
                })
            }
        };

        if let Some(reference) = map.get("$ref") {
            return self.describe_ref(map, reference, pointer);
        }

        let description = map
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        match self.resolve_kind(map, pointer)? {
            Kind::Object => {
                let children = self.describe_properties(map, pointer)?;
                Ok(SchemaDescription::Object {
                    children,
                    description,
                })
            }
            Kind::Leaf(kind) => Ok(SchemaDescription::Leaf {
                kind,
                description,
                value: fixed_value(map),
            }),
        }
    }

    fn describe_ref(
        &mut self,
        map: &'a Map<String, Value>,
        reference: &Value,
        pointer: &str,
    ) -> Result<SchemaDescription, SchemaDescribeError> {
        let reference = reference
            .as_str()
            .ok_or_else(|| SchemaDescribeError::UnresolvedRef {
                pointer: pointer.to_string(),
                reference: reference.to_string(),
            })?;

        let target_pointer =
            reference
                .strip_prefix('#')
                .ok_or_else(|| SchemaDescribeError::UnresolvedRef {
                    pointer: pointer.to_string(),
                    reference: reference.to_string(),
                })?;

        if self.ref_stack.iter().any(|r| r == reference) || self.ref_stack.len() >= self.max_depth
        {
            return Err(SchemaDescribeError::RefCycle {
                pointer: pointer.to_string(),
                reference: reference.to_string(),
            });
        }

        // The fragment is URI-encoded; the pointer lookup wants raw tokens.
        let target_pointer = urlencoding::decode(target_pointer)
            .map_err(|_| SchemaDescribeError::UnresolvedRef {
                pointer: pointer.to_string(),
                reference: reference.to_string(),
            })?
            .into_owned();

        let target =
            self.root
                .pointer(&target_pointer)
                .ok_or_else(|| SchemaDescribeError::UnresolvedRef {
                    pointer: pointer.to_string(),
                    reference: reference.to_string(),
                })?;

        debug!(pointer, reference, "expanding local $ref");
        self.ref_stack.push(reference.to_string());
        let resolved = self.describe_node(target, &target_pointer);
        self.ref_stack.pop();
        let mut resolved = resolved?;

        // Keywords next to the `$ref` refine the referenced schema.
        if let Some(text) = map.get("description").and_then(Value::as_str) {
            resolved = resolved.with_description(text);
        }
        if let Some(literal) = fixed_value(map) {
            resolved = resolved.with_value(literal);
        }
        Ok(resolved)
    }

    fn describe_properties(
        &mut self,
        map: &'a Map<String, Value>,
        pointer: &str,
    ) -> Result<Children, SchemaDescribeError> {
        let mut children = Children::new();
        let properties = match map.get("properties") {
            None => return Ok(children),
            Some(Value::Object(properties)) => properties,
            Some(_) => {
                return Err(SchemaDescribeError::NotASchema {
                    pointer: format!("{pointer}/properties"),
                })
            }
        };

        for (key, child) in properties {
            let child_pointer = format!("{pointer}/properties/{}", escape_pointer_token(key));
            let description = self.describe_node(child, &child_pointer)?;
            children.insert(key.as_str(), description);
        }
        Ok(children)
    }

    fn resolve_kind(
        &self,
        map: &Map<String, Value>,
        pointer: &str,
    ) -> Result<Kind, SchemaDescribeError> {
        match map.get("type") {
            Some(Value::String(name)) => kind_for_type_name(name, map, pointer),
            Some(Value::Array(names)) => {
                let mut declared = Vec::new();
                for name in names {
                    match name.as_str() {
                        Some("null") => {}
                        Some(other) => declared.push(other),
                        None => {
                            return Err(SchemaDescribeError::UnknownType {
                                pointer: pointer.to_string(),
                                type_name: name.to_string(),
                            })
                        }
                    }
                }
                match declared.as_slice() {
                    [] => Ok(Kind::Leaf(PrimitiveType::Null)),
                    [single] => kind_for_type_name(single, map, pointer),
                    _ => Ok(Kind::Leaf(PrimitiveType::Alternatives)),
                }
            }
            Some(other) => Err(SchemaDescribeError::UnknownType {
                pointer: pointer.to_string(),
                type_name: other.to_string(),
            }),
            None => Ok(infer_kind(map)),
        }
    }
}

/// Resolved shape of a schema node.
enum Kind {
    Object,
    Leaf(PrimitiveType),
}

fn kind_for_type_name(
    name: &str,
    map: &Map<String, Value>,
    pointer: &str,
) -> Result<Kind, SchemaDescribeError> {
    let kind = match name {
        "object" => return Ok(Kind::Object),
        "string" => string_kind(map),
        "number" | "integer" => PrimitiveType::Number,
        "boolean" => PrimitiveType::Boolean,
        "array" => PrimitiveType::Array,
        "null" => PrimitiveType::Null,
        other => {
            return Err(SchemaDescribeError::UnknownType {
                pointer: pointer.to_string(),
                type_name: format!("\"{other}\""),
            })
        }
    };
    Ok(Kind::Leaf(kind))
}

fn string_kind(map: &Map<String, Value>) -> PrimitiveType {
    let format = map.get("format").and_then(Value::as_str);
    let encoding = map.get("contentEncoding").and_then(Value::as_str);
    match (format, encoding) {
        (Some("date" | "date-time" | "time"), _) => PrimitiveType::Date,
        (_, Some("base64")) => PrimitiveType::Binary,
        _ => PrimitiveType::String,
    }
}

/// Shape of a node without a `type` keyword.
fn infer_kind(map: &Map<String, Value>) -> Kind {
    if map.contains_key("properties") {
        return Kind::Object;
    }
    if let Some(literal) = fixed_value(map) {
        return Kind::Leaf(literal.primitive());
    }
    if map.contains_key("anyOf") || map.contains_key("oneOf") {
        return Kind::Leaf(PrimitiveType::Alternatives);
    }
    Kind::Leaf(PrimitiveType::Any)
}

/// The only value a node permits: `const`, or an `enum` with one member.
fn fixed_value(map: &Map<String, Value>) -> Option<LiteralValue> {
    if let Some(value) = map.get("const") {
        return LiteralValue::from_json(value);
    }
    match map.get("enum") {
        Some(Value::Array(values)) if values.len() == 1 => LiteralValue::from_json(&values[0]),
        _ => None,
    }
}

/// Escape a property name for use as a JSON Pointer token (RFC 6901).
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use siren_core::SchemaType;

    fn describe(doc: &Value) -> Result<SchemaDescription, SchemaDescribeError> {
        Introspector::new(doc, &DescribeOptions::default()).describe_root()
    }

    fn leaf_kind(doc: Value) -> PrimitiveType {
        match describe(&doc).unwrap().schema_type() {
            SchemaType::Primitive(p) => p,
            SchemaType::Object => panic!("Expected a leaf for {doc}"),
        }
    }

    #[test]
    fn test_primitive_type_names() {
        assert_eq!(leaf_kind(json!({"type": "string"})), PrimitiveType::String);
        assert_eq!(leaf_kind(json!({"type": "number"})), PrimitiveType::Number);
        assert_eq!(leaf_kind(json!({"type": "integer"})), PrimitiveType::Number);
        assert_eq!(leaf_kind(json!({"type": "boolean"})), PrimitiveType::Boolean);
        assert_eq!(leaf_kind(json!({"type": "array"})), PrimitiveType::Array);
        assert_eq!(leaf_kind(json!({"type": "null"})), PrimitiveType::Null);
    }

    #[test]
    fn test_string_refinements() {
        assert_eq!(
            leaf_kind(json!({"type": "string", "format": "date-time"})),
            PrimitiveType::Date
        );
        assert_eq!(
            leaf_kind(json!({"type": "string", "format": "date"})),
            PrimitiveType::Date
        );
        assert_eq!(
            leaf_kind(json!({"type": "string", "contentEncoding": "base64"})),
            PrimitiveType::Binary
        );
        assert_eq!(
            leaf_kind(json!({"type": "string", "format": "email"})),
            PrimitiveType::String
        );
    }

    #[test]
    fn test_type_arrays() {
        assert_eq!(leaf_kind(json!({"type": ["string", "null"]})), PrimitiveType::String);
        assert_eq!(leaf_kind(json!({"type": ["null"]})), PrimitiveType::Null);
        assert_eq!(
            leaf_kind(json!({"type": ["string", "number"]})),
            PrimitiveType::Alternatives
        );
        let obj = describe(&json!({"type": ["object", "null"], "properties": {}})).unwrap();
        assert_eq!(obj.schema_type(), SchemaType::Object);
    }

    #[test]
    fn test_inferred_kinds() {
        assert_eq!(leaf_kind(json!({})), PrimitiveType::Any);
        assert_eq!(leaf_kind(json!(true)), PrimitiveType::Any);
        assert_eq!(leaf_kind(json!({"const": "x"})), PrimitiveType::String);
        assert_eq!(leaf_kind(json!({"enum": [3]})), PrimitiveType::Number);
        assert_eq!(leaf_kind(json!({"enum": [1, 2]})), PrimitiveType::Any);
        assert_eq!(
            leaf_kind(json!({"anyOf": [{"type": "string"}, {"type": "number"}]})),
            PrimitiveType::Alternatives
        );
        assert_eq!(
            describe(&json!({"properties": {"a": {"type": "string"}}}))
                .unwrap()
                .schema_type(),
            SchemaType::Object
        );
    }

    #[test]
    fn test_declared_type_wins_over_one_of() {
        let doc = json!({"type": "string", "oneOf": [{"format": "email"}, {"format": "uri"}]});
        assert_eq!(leaf_kind(doc), PrimitiveType::String);
    }

    #[test]
    fn test_fixed_values() {
        let desc = describe(&json!({"type": "boolean", "const": true})).unwrap();
        assert_eq!(desc.value(), Some(&LiteralValue::Boolean(true)));

        let desc = describe(&json!({"enum": ["only"]})).unwrap();
        assert_eq!(desc.value(), Some(&LiteralValue::from("only")));

        let desc = describe(&json!({"const": null})).unwrap();
        assert_eq!(desc.value(), None);
    }

    #[test]
    fn test_properties_in_document_order() {
        let doc: Value =
            serde_json::from_str(r#"{"type":"object","properties":{"z":{},"a":{},"m":{}}}"#)
                .unwrap();
        let desc = describe(&doc).unwrap();
        let keys: Vec<&str> = desc.children().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_ref_resolution_with_description_override() {
        let doc = json!({
            "type": "object",
            "properties": {
                "home": {"$ref": "#/$defs/address", "description": "Home address"}
            },
            "$defs": {
                "address": {
                    "type": "object",
                    "description": "An address",
                    "properties": {"street": {"type": "string"}}
                }
            }
        });
        let desc = describe(&doc).unwrap();
        let home = desc.children().unwrap().get("home").unwrap();
        assert_eq!(home.schema_type(), SchemaType::Object);
        assert_eq!(home.description(), Some("Home address"));
        assert!(home.children().unwrap().get("street").is_some());
    }

    #[test]
    fn test_ref_siblings_fix_the_value() {
        let doc = json!({
            "type": "object",
            "properties": {
                "kind": {"$ref": "#/$defs/s", "const": "x"},
                "mode": {"$ref": "#/$defs/s", "enum": ["fast"]},
                "free": {"$ref": "#/$defs/s"}
            },
            "$defs": {"s": {"type": "string"}}
        });
        let desc = describe(&doc).unwrap();
        let children = desc.children().unwrap();
        assert_eq!(children.get("kind").unwrap().value(), Some(&LiteralValue::from("x")));
        assert_eq!(children.get("mode").unwrap().value(), Some(&LiteralValue::from("fast")));
        assert_eq!(children.get("free").unwrap().value(), None);
    }

    #[test]
    fn test_percent_encoded_ref_resolves() {
        let doc = json!({
            "type": "object",
            "properties": {
                "who": {"$ref": "#/$defs/my%20name"},
                "path": {"$ref": "#/$defs/a~1b"}
            },
            "$defs": {
                "my name": {"type": "string"},
                "a/b": {"type": "number"}
            }
        });
        let desc = describe(&doc).unwrap();
        let children = desc.children().unwrap();
        assert_eq!(
            children.get("who").unwrap().schema_type(),
            SchemaType::Primitive(PrimitiveType::String)
        );
        assert_eq!(
            children.get("path").unwrap().schema_type(),
            SchemaType::Primitive(PrimitiveType::Number)
        );
    }

    #[test]
    fn test_same_ref_used_by_siblings() {
        let doc = json!({
            "type": "object",
            "properties": {
                "a": {"$ref": "#/definitions/name"},
                "b": {"$ref": "#/definitions/name"}
            },
            "definitions": {"name": {"type": "string"}}
        });
        let desc = describe(&doc).unwrap();
        assert_eq!(desc.children().unwrap().len(), 2);
    }

    #[test]
    fn test_ref_cycle_detected() {
        let doc = json!({
            "type": "object",
            "properties": {"node": {"$ref": "#/definitions/node"}},
            "definitions": {
                "node": {
                    "type": "object",
                    "properties": {"next": {"$ref": "#/definitions/node"}}
                }
            }
        });
        let err = describe(&doc).unwrap_err();
        assert!(
            matches!(err, SchemaDescribeError::RefCycle { .. }),
            "Expected RefCycle, got: {err}"
        );
    }

    #[test]
    fn test_ref_depth_limit() {
        let doc = json!({
            "type": "object",
            "properties": {"a": {"$ref": "#/definitions/a"}},
            "definitions": {
                "a": {"$ref": "#/definitions/b"},
                "b": {"type": "string"}
            }
        });
        let opts = DescribeOptions::default().with_max_depth(1);
        let err = Introspector::new(&doc, &opts).describe_root().unwrap_err();
        assert!(matches!(err, SchemaDescribeError::RefCycle { .. }));
    }

    #[test]
    fn test_unresolved_refs() {
        for reference in ["#/definitions/missing", "https://example.com/other.json"] {
            let doc = json!({"type": "object", "properties": {"x": {"$ref": reference}}});
            let err = describe(&doc).unwrap_err();
            match err {
                SchemaDescribeError::UnresolvedRef { pointer, .. } => {
                    assert_eq!(pointer, "/properties/x");
                }
                other => panic!("Expected UnresolvedRef, got: {other}"),
            }
        }
    }

    #[test]
    fn test_unknown_type() {
        let err = describe(&json!({"type": "object", "properties": {"x": {"type": "text"}}}))
            .unwrap_err();
        assert!(matches!(err, SchemaDescribeError::UnknownType { .. }));
        assert!(err.to_string().contains("/properties/x"));
    }

    #[test]
    fn test_not_a_schema_pointer_is_escaped() {
        let err = describe(&json!({"type": "object", "properties": {"a/b": 5}})).unwrap_err();
        match err {
            SchemaDescribeError::NotASchema { pointer } => assert_eq!(pointer, "/properties/a~1b"),
            other => panic!("Expected NotASchema, got: {other}"),
        }
    }
}
