//! Compiler error types.
//!
//! The generators themselves never fail. Errors come from the edges of the
//! pipeline: reading and parsing project files, writing artifacts, and the
//! opt-in model validation pass.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while loading, validating or writing a project.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(canvas::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Project Errors
    // =========================================================================
    #[error("Failed to parse project file '{}' at {line}:{column}: {message}", path.display())]
    #[diagnostic(
        code(canvas::project::parse_failed),
        help("Project files are JSON documents with `components`, `logicBlocks` and `databaseTables` arrays")
    )]
    ProjectParseFailed {
        path: PathBuf,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Unknown artifact '{name}'")]
    #[diagnostic(
        code(canvas::project::unknown_artifact),
        help("Valid artifacts are: frontend, backend, database")
    )]
    UnknownArtifact {
        name: String,
    },

    // =========================================================================
    // Model Errors
    // =========================================================================
    #[error("Duplicate component id: {id}")]
    #[diagnostic(
        code(canvas::model::duplicate_component),
        help("Component ids must be unique within a project")
    )]
    DuplicateComponentId {
        id: String,
    },

    #[error("Duplicate logic block id: {id}")]
    #[diagnostic(
        code(canvas::model::duplicate_block),
        help("Logic block ids must be unique; connections refer to blocks by id")
    )]
    DuplicateBlockId {
        id: String,
    },

    #[error("Duplicate table id: {id}")]
    #[diagnostic(code(canvas::model::duplicate_table))]
    DuplicateTableId {
        id: String,
    },

    #[error("Table '{table}' has a duplicate field id: {id}")]
    #[diagnostic(code(canvas::model::duplicate_field))]
    DuplicateFieldId {
        table: String,
        id: String,
    },

    #[error("Table '{id}' has no name")]
    #[diagnostic(
        code(canvas::model::unnamed_table),
        help("Every table needs a name; it becomes the generated table name")
    )]
    UnnamedTable {
        id: String,
    },

    #[error("Table '{table}' has no fields")]
    #[diagnostic(
        code(canvas::model::empty_table),
        help("Add at least one field to the table before generating the schema")
    )]
    EmptyTable {
        table: String,
    },

    #[error("Field '{field}' in table '{table}' has no name")]
    #[diagnostic(code(canvas::model::unnamed_field))]
    UnnamedField {
        table: String,
        field: String,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompilerError::io("out/index.html", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to access 'out/index.html': permission denied"
        );

        let err = CompilerError::EmptyTable { table: "users".into() };
        assert_eq!(err.to_string(), "Table 'users' has no fields");
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = CompilerError::DuplicateBlockId { id: "input-1".into() };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("canvas::model::duplicate_block"));
    }
}
