//! Code generation from the design model.
//!
//! Three independent generators, each reading one slice of the model:
//! - Frontend: placed components -> self-contained HTML document
//! - Backend: logic blocks -> Express server module
//! - Schema: database tables -> `CREATE TABLE` statements
//!
//! All three are pure: the same input always yields byte-identical output.
//! Nothing here reads the clock, the environment or the file system.

pub mod backend;
pub mod frontend;
pub mod project;
pub mod schema;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostic::CompilerError;
use crate::model::DesignModel;

pub use backend::{generate_backend, generate_backend_with, resolve_routes, BackendOptions, Route};
pub use frontend::generate_frontend;
pub use schema::{generate_schema, generate_schema_with, SchemaOptions};

/// The three artifacts produced from a design model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Frontend,
    Backend,
    Database,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Frontend, ArtifactKind::Backend, ArtifactKind::Database];

    /// Key in the generated-code map.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Frontend => "frontend",
            ArtifactKind::Backend => "backend",
            ArtifactKind::Database => "database",
        }
    }

    /// File name the artifact is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Frontend => "index.html",
            ArtifactKind::Backend => "server.js",
            ArtifactKind::Database => "schema.sql",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(ArtifactKind::Frontend),
            "backend" => Ok(ArtifactKind::Backend),
            "database" => Ok(ArtifactKind::Database),
            _ => Err(CompilerError::UnknownArtifact { name: s.to_string() }),
        }
    }
}

/// Generated-code map: one string per artifact kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    #[serde(default)]
    pub frontend: String,
    #[serde(default)]
    pub backend: String,
    #[serde(default)]
    pub database: String,
}

impl GeneratedCode {
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Frontend => &self.frontend,
            ArtifactKind::Backend => &self.backend,
            ArtifactKind::Database => &self.database,
        }
    }

    pub fn set(&mut self, kind: ArtifactKind, code: String) {
        match kind {
            ArtifactKind::Frontend => self.frontend = code,
            ArtifactKind::Backend => self.backend = code,
            ArtifactKind::Database => self.database = code,
        }
    }

    /// Artifacts as (file name, content) pairs, in a fixed order.
    pub fn files(&self) -> Vec<(String, String)> {
        ArtifactKind::ALL
            .iter()
            .map(|kind| (kind.file_name().to_string(), self.get(*kind).to_string()))
            .collect()
    }
}

/// Options for the generators that have any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub backend: BackendOptions,
    pub schema: SchemaOptions,
}

/// Runs one generator over its slice of the model.
pub fn generate_artifact(model: &DesignModel, kind: ArtifactKind, options: &GenerateOptions) -> String {
    let code = match kind {
        ArtifactKind::Frontend => generate_frontend(&model.components),
        ArtifactKind::Backend => generate_backend_with(&model.logic_blocks, &options.backend),
        ArtifactKind::Database => generate_schema_with(&model.database_tables, &options.schema),
    };
    tracing::debug!(artifact = kind.as_str(), bytes = code.len(), "generated artifact");
    code
}

/// Runs all three generators.
pub fn generate(model: &DesignModel, options: &GenerateOptions) -> GeneratedCode {
    GeneratedCode {
        frontend: generate_artifact(model, ArtifactKind::Frontend, options),
        backend: generate_artifact(model, ArtifactKind::Backend, options),
        database: generate_artifact(model, ArtifactKind::Database, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentKind, DatabaseField, DatabaseTable, FieldType, LogicBlock, PlacedComponent, Position};

    fn sample_model() -> DesignModel {
        let mut model = DesignModel::new();
        model
            .components
            .push(PlacedComponent::new("button-1", ComponentKind::Button, Position::new(10.0, 20.0)));
        model.logic_blocks.push(LogicBlock::route("input-1", "get", "/api/items"));
        model.database_tables.push(DatabaseTable::new(
            "t1",
            "items",
            vec![DatabaseField::new("f1", "title", FieldType::String).required()],
        ));
        model
    }

    #[test]
    fn test_generate_fills_all_keys() {
        let code = generate(&sample_model(), &GenerateOptions::default());
        assert!(code.frontend.contains("<!DOCTYPE html>"));
        assert!(code.backend.contains("app.get('/api/items'"));
        assert!(code.database.contains("CREATE TABLE IF NOT EXISTS items"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let model = sample_model();
        let options = GenerateOptions::default();
        let first = generate(&model, &options);
        for _ in 0..5 {
            assert_eq!(generate(&model, &options), first);
        }
    }

    #[test]
    fn test_generated_code_serializes_with_three_keys() {
        let code = GeneratedCode {
            frontend: "f".into(),
            backend: "b".into(),
            database: "d".into(),
        };
        let value = serde_json::to_value(&code).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["frontend"], "f");
        assert_eq!(obj["backend"], "b");
        assert_eq!(obj["database"], "d");
    }

    #[test]
    fn test_get_and_set() {
        let mut code = GeneratedCode::default();
        code.set(ArtifactKind::Backend, "edited".to_string());
        assert_eq!(code.get(ArtifactKind::Backend), "edited");
        assert_eq!(code.get(ArtifactKind::Frontend), "");
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!("database".parse::<ArtifactKind>().unwrap(), ArtifactKind::Database);
        assert!("styles".parse::<ArtifactKind>().is_err());
        assert_eq!(ArtifactKind::Frontend.file_name(), "index.html");
        assert_eq!(ArtifactKind::Backend.file_name(), "server.js");
        assert_eq!(ArtifactKind::Database.file_name(), "schema.sql");
    }

    #[test]
    fn test_files_order() {
        let code = generate(&sample_model(), &GenerateOptions::default());
        let names: Vec<String> = code.files().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["index.html", "server.js", "schema.sql"]);
    }
}
