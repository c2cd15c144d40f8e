use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};

use crate::core_api::{CoreError, CoreErrorCode};

/// Untyped tree a player document is parsed into before any section reads it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Text(String),
    Number(Number),
    Sequence(Vec<Node>),
    Mapping(BTreeMap<String, Node>),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Looks up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::Text(s),
            Value::Number(n) => Self::Number(n),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => n.serialize(serializer),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// A parsed player document: a mapping at the root, one key per section.
///
/// Built once per restore attempt and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: BTreeMap<String, Node>,
}

impl Document {
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            CoreError::new(CoreErrorCode::Parse, format!("document is not valid JSON: {e}"))
        })?;
        Self::from_node(Node::from(value))
    }

    pub fn from_node(node: Node) -> Result<Self, CoreError> {
        match node {
            Node::Mapping(root) => Ok(Self { root }),
            other => Err(CoreError::new(
                CoreErrorCode::Parse,
                format!("document root must be a mapping, found {}", other.kind()),
            )),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.root.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.root.insert(key.into(), node)
    }

    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.root.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_json_into_tagged_nodes() {
        let doc = Document::from_json_str(
            r#"{"grave_type":"3","flags":[true,null],"nested":{"n":4}}"#,
        )
        .expect("document should parse");

        assert_eq!(doc.get("grave_type"), Some(&Node::text("3")));
        assert_eq!(
            doc.get("flags"),
            Some(&Node::Sequence(vec![Node::Bool(true), Node::Null]))
        );
        let nested = doc.get("nested").expect("nested should exist");
        assert_eq!(nested.get("n").map(Node::kind), Some("number"));
    }

    #[test]
    fn rejects_non_mapping_root() {
        let err = Document::from_json_str("[1,2,3]").expect_err("sequence root must fail");
        assert_eq!(err.code, CoreErrorCode::Parse);
        assert!(err.message.contains("sequence"));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = Document::from_json_str("{\"core_data\":").expect_err("truncated json");
        assert_eq!(err.code, CoreErrorCode::Parse);
    }

    #[test]
    fn serializes_back_to_json_shape() {
        let node = Node::from(serde_json::json!({"a": ["1", 2, false]}));
        let value = serde_json::to_value(&node).expect("node should serialize");
        assert_eq!(value, serde_json::json!({"a": ["1", 2, false]}));
    }
}
