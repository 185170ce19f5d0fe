//! Compiler configuration.

use std::path::PathBuf;

use crate::codegen::GenerateOptions;

/// Configuration for the canvas compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Saved project document to compile.
    pub project_file: PathBuf,

    /// Directory to write the generated project into.
    pub out_dir: PathBuf,

    /// Skip model validation (for testing).
    pub skip_validation: bool,

    /// Generator settings.
    pub options: GenerateOptions,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            project_file: PathBuf::from("project.json"),
            out_dir: PathBuf::from("generated"),
            skip_validation: false,
            options: GenerateOptions::default(),
        }
    }
}
