//! Logic blocks of the backend-behavior graph.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, non_empty, Position};

/// Logic block types.
///
/// `Input` blocks are externally triggered entry points (HTTP routes); `Auth`,
/// `Database` and `Response` are effects attached to an entry point.
/// `Transform` is part of the model but has no generation effect yet, and
/// neither does a block whose type is not one of these (`Other`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Input,
    Auth,
    Database,
    Transform,
    Response,
    Other(String),
}

impl BlockKind {
    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Input => "input",
            BlockKind::Auth => "auth",
            BlockKind::Database => "database",
            BlockKind::Transform => "transform",
            BlockKind::Response => "response",
            BlockKind::Other(raw) => raw,
        }
    }

    /// Whether a block of this kind can be attached to a route.
    pub fn is_effect(&self) -> bool {
        matches!(self, BlockKind::Auth | BlockKind::Database | BlockKind::Response)
    }

    /// Label the palette gives a new block ("Input", "Auth", ...).
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().chain(chars).collect(),
        }
    }
}

impl From<String> for BlockKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "input" => BlockKind::Input,
            "auth" => BlockKind::Auth,
            "database" => BlockKind::Database,
            "transform" => BlockKind::Transform,
            "response" => BlockKind::Response,
            _ => BlockKind::Other(raw),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific block configuration.
///
/// `method`/`path` configure `input` blocks, `query` configures `database`
/// blocks. Other keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BlockData {
    pub fn method(&self) -> Option<&str> {
        non_empty(&self.method)
    }

    pub fn path(&self) -> Option<&str> {
        non_empty(&self.path)
    }

    pub fn query(&self) -> Option<&str> {
        non_empty(&self.query)
    }
}

/// One node in the backend-behavior graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicBlock {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: BlockKind,

    /// Editor coordinates only.
    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub data: BlockData,

    /// Ids of blocks this one is wired to (block -> dependent block).
    #[serde(default)]
    pub connections: Vec<String>,
}

impl LogicBlock {
    /// Creates a block the way the palette does: labelled, empty config, unwired.
    pub fn new(id: impl Into<String>, kind: BlockKind, position: Position) -> Self {
        let label = kind.label();
        Self {
            id: id.into(),
            kind,
            position,
            data: BlockData {
                label: Some(label),
                config: Some(Value::Object(Default::default())),
                ..Default::default()
            },
            connections: Vec::new(),
        }
    }

    /// Creates an `input` block for a route.
    pub fn route(id: impl Into<String>, method: &str, path: &str) -> Self {
        let mut block = Self::new(id, BlockKind::Input, Position::default());
        block.data.method = Some(method.to_string());
        block.data.path = Some(path.to_string());
        block
    }

    /// Creates a `database` block running `query`.
    pub fn query(id: impl Into<String>, query: &str) -> Self {
        let mut block = Self::new(id, BlockKind::Database, Position::default());
        block.data.query = Some(query.to_string());
        block
    }

    /// Adds an outgoing connection unless it already exists.
    pub fn connect_to(&mut self, target: impl Into<String>) -> bool {
        let target = target.into();
        if self.connections.contains(&target) {
            return false;
        }
        self.connections.push(target);
        true
    }

    pub fn is_connected_to(&self, id: &str) -> bool {
        self.connections.iter().any(|c| c == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_block() {
        let block = LogicBlock::new("auth-1", BlockKind::Auth, Position::new(5.0, 6.0));
        assert_eq!(block.data.label.as_deref(), Some("Auth"));
        assert_eq!(block.data.config, Some(Value::Object(Default::default())));
        assert!(block.connections.is_empty());
    }

    #[test]
    fn test_block_data_keeps_unknown_keys() {
        let json = r#"{ "method": "post", "path": "/x", "timeout": 30 }"#;
        let data: BlockData = serde_json::from_str(json).unwrap();
        assert_eq!(data.method(), Some("post"));
        assert_eq!(data.extra.get("timeout"), Some(&Value::from(30)));
    }

    #[test]
    fn test_missing_data_and_connections() {
        let json = r#"{ "id": "t", "type": "transform" }"#;
        let block: LogicBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind, BlockKind::Transform);
        assert!(block.connections.is_empty());
        assert_eq!(block.data.method(), None);
    }

    #[test]
    fn test_connect_to_is_idempotent() {
        let mut block = LogicBlock::route("in", "get", "/");
        assert!(block.connect_to("db"));
        assert!(!block.connect_to("db"));
        assert_eq!(block.connections.len(), 1);
        assert!(block.is_connected_to("db"));
    }

    #[test]
    fn test_effect_kinds() {
        assert!(BlockKind::Auth.is_effect());
        assert!(BlockKind::Response.is_effect());
        assert!(!BlockKind::Transform.is_effect());
        assert!(!BlockKind::Input.is_effect());
    }
}
