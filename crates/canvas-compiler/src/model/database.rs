//! Database tables designed in the schema builder.

use serde::{Deserialize, Serialize};

use super::{lenient, non_empty, Position};

/// Semantic column type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Uuid,
    /// Any type string the builder doesn't know. Rendered as text.
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// SQL column type.
    pub fn to_sql(&self) -> &'static str {
        match self {
            FieldType::String => "TEXT",
            FieldType::Number => "INTEGER",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "TIMESTAMP",
            FieldType::Uuid => "UUID",
            FieldType::Unknown => "TEXT",
        }
    }
}

/// Cardinality of a relation between two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToMany,
}

/// A relation drawn between two tables.
///
/// Stored with the table but not consumed by the schema generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRelation {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

/// A column declared by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(
        rename = "defaultValue",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,
}

impl DatabaseField {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            required: false,
            unique: false,
            default_value: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Default literal, if one is set and non-empty.
    pub fn default_literal(&self) -> Option<&str> {
        non_empty(&self.default_value)
    }
}

/// A table in the schema designer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseTable {
    pub id: String,
    /// Emitted verbatim as the table name.
    pub name: String,
    #[serde(default)]
    pub fields: Vec<DatabaseField>,
    /// Editor coordinates only.
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub relations: Vec<DatabaseRelation>,
}

impl DatabaseTable {
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Vec<DatabaseField>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields,
            position: Position::default(),
            relations: Vec::new(),
        }
    }
}
