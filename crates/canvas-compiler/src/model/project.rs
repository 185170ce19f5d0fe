//! Project documents.
//!
//! A project file is the JSON document the editor autosaves: project metadata,
//! the design model, and the last generated code. The generated code is opaque
//! text here; it is stored and loaded unchanged.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DesignModel;
use crate::codegen::GeneratedCode;
use crate::diagnostic::CompilerError;

/// A saved design project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default = "default_project_name")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(flatten)]
    pub model: DesignModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_code: Option<GeneratedCode>,
}

fn default_project_name() -> String {
    "Untitled Project".to_string()
}

impl ProjectFile {
    pub fn new(name: impl Into<String>, model: DesignModel) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            model,
            generated_code: None,
        }
    }

    /// Parses a project document.
    pub fn from_json(path: &Path, content: &str) -> Result<Self, CompilerError> {
        serde_json::from_str(content).map_err(|e| CompilerError::ProjectParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        })
    }

    /// Loads a project file from disk.
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let content = std::fs::read_to_string(path).map_err(|e| CompilerError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(path, &content)
    }

    /// Saves the project file to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), CompilerError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CompilerError::IoError {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| CompilerError::IoError {
            path: path.to_path_buf(),
            message: format!("Failed to serialize project: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CompilerError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentKind, PlacedComponent, Position};
    use tempfile::TempDir;

    #[test]
    fn test_project_file_save_and_load() {
        let mut model = DesignModel::new();
        model
            .components
            .push(PlacedComponent::new("text-1", ComponentKind::Text, Position::new(1.0, 2.0)));

        let mut project = ProjectFile::new("Landing", model);
        project.generated_code = Some(GeneratedCode {
            frontend: "<html></html>".to_string(),
            backend: String::new(),
            database: String::new(),
        });

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("project.json");

        project.save(&path).unwrap();
        let loaded = ProjectFile::load(&path).unwrap();

        assert_eq!(loaded, project);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"databaseTables\""));
        assert!(raw.contains("\"generatedCode\""));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ProjectFile::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CompilerError::IoError { .. })));
    }

    #[test]
    fn test_parse_error_has_location() {
        let result = ProjectFile::from_json(Path::new("p.json"), "{\n  \"components\": [\n");
        match result {
            Err(CompilerError::ProjectParseFailed { line, .. }) => assert!(line >= 2),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_for_minimal_document() {
        let project = ProjectFile::from_json(Path::new("p.json"), "{}").unwrap();
        assert_eq!(project.name, "Untitled Project");
        assert!(project.model.is_empty());
        assert!(project.generated_code.is_none());
    }
}
