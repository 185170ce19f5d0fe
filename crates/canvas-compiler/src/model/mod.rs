//! Design model consumed by the code generators.
//!
//! Everything here is a plain serializable record. The JSON shape matches the
//! project documents written by the visual editor (camelCase keys), so a saved
//! project can be loaded straight into these types. Generators only read the
//! model; mutation goes through [`crate::session::DesignSession`].

mod component;
mod database;
mod logic;
mod project;

pub use component::{ComponentKind, ComponentProperties, PlacedComponent, Size, DEFAULT_IMAGE_SRC};
pub use database::{DatabaseField, DatabaseRelation, DatabaseTable, FieldType, RelationKind};
pub use logic::{BlockData, BlockKind, LogicBlock};
pub use project::ProjectFile;

use serde::{Deserialize, Serialize};

/// Pixel offset on a design surface, top-left anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Snapshot of everything the generators read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignModel {
    #[serde(default)]
    pub components: Vec<PlacedComponent>,
    #[serde(default)]
    pub logic_blocks: Vec<LogicBlock>,
    #[serde(default)]
    pub database_tables: Vec<DatabaseTable>,
}

impl DesignModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.logic_blocks.is_empty() && self.database_tables.is_empty()
    }
}

/// Returns the value when it is present and non-empty.
///
/// Property bags follow "missing or empty means default" semantics, so every
/// accessor funnels through here.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Serde helpers for open property bags.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accepts any JSON value for a string slot.
    ///
    /// Strings pass through. Non-zero numbers and `true` are stringified;
    /// `0`, `false` and anything else are treated as missing, so a falsy value
    /// falls back to the slot's default.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }))
    }
}
