//! # Canvas Compiler
//!
//! This crate turns a visual design model into runnable source artifacts: an
//! HTML page from the placed UI components, an Express server module from the
//! logic-block graph, and SQL table definitions from the designed tables.
//!
//! Generation is deterministic. The same model always produces byte-identical
//! output, with no clocks, random ids or environment lookups involved.
//!
//! ## Architecture
//!
//! ```text
//! project.json
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Model     │  Components, logic blocks, tables
//! │ (JSON → Rs)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Structure errors, graph & SQL warnings
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  index.html, server.js, schema.sql
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Output    │  Artifacts + npm scaffolding
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use canvas_compiler::{Compiler, CompilerConfig};
//!
//! let config = CompilerConfig {
//!     project_file: "project.json".into(),
//!     out_dir: "generated".into(),
//!     ..Default::default()
//! };
//!
//! let result = Compiler::new(config).compile()?;
//! println!("{} routes", result.routes);
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod model;
pub mod session;
pub mod validate;

use std::path::Path;

pub use codegen::{ArtifactKind, GenerateOptions, GeneratedCode};
pub use config::CompilerConfig;
pub use diagnostic::{CompilerError, Warning};
pub use model::{DesignModel, ProjectFile};
pub use session::DesignSession;

/// The main compiler struct that orchestrates the compilation pipeline.
pub struct Compiler {
    config: CompilerConfig,
}

/// Summary of a checked or compiled project.
#[derive(Debug, Clone, Default)]
pub struct CompileResult {
    /// Number of placed components.
    pub components: usize,
    /// Number of generated routes.
    pub routes: usize,
    /// Number of generated tables.
    pub tables: usize,
    /// Validation warnings. Empty when validation was skipped.
    pub warnings: Vec<Warning>,
}

impl CompileResult {
    fn summarize(model: &DesignModel, routes: usize, warnings: Vec<Warning>) -> Self {
        Self {
            components: model.components.len(),
            routes,
            tables: model.database_tables.len(),
            warnings,
        }
    }
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Reads the configured project file.
    pub fn load_project(&self) -> Result<ProjectFile, CompilerError> {
        ProjectFile::load(&self.config.project_file)
    }

    /// Validates the project without generating code.
    ///
    /// The returned summary counts what `compile` would generate from the
    /// same document.
    pub fn check(&self) -> Result<CompileResult, CompilerError> {
        let project = self.load_project()?;
        let warnings = validate::validate_model(&project.model)?;
        let routes = codegen::resolve_routes(&project.model.logic_blocks).len();
        Ok(CompileResult::summarize(&project.model, routes, warnings))
    }

    /// Compiles the project into the output directory.
    ///
    /// This runs the full pipeline:
    /// 1. Load the project document
    /// 2. Validate the model (unless skipped)
    /// 3. Generate the three artifacts
    /// 4. Write artifacts and npm scaffolding
    pub fn compile(&self) -> Result<CompileResult, CompilerError> {
        // Phase 1: Load
        let project = self.load_project()?;
        let model = &project.model;

        // Phase 2: Validate
        let warnings = if self.config.skip_validation {
            Vec::new()
        } else {
            validate::validate_model(model)?
        };

        // Phase 3: Generate
        let generated = codegen::generate(model, &self.config.options);
        let routes = codegen::resolve_routes(&model.logic_blocks);
        let uses_db = routes.iter().any(|r| r.query.is_some());

        // Phase 4: Write output
        let backend = &self.config.options.backend;
        let files = codegen::project::project_files(
            &project.name,
            &generated,
            backend.port,
            &backend.secret_env,
            uses_db,
        );
        self.write_output(&files)?;

        tracing::info!(
            out_dir = %self.config.out_dir.display(),
            files = files.len(),
            "wrote generated project"
        );

        Ok(CompileResult::summarize(model, routes.len(), warnings))
    }

    /// Generates a single artifact without touching the filesystem.
    pub fn generate_one(&self, kind: ArtifactKind) -> Result<String, CompilerError> {
        let project = self.load_project()?;
        if !self.config.skip_validation {
            validate::validate_model(&project.model)?;
        }
        Ok(codegen::generate_artifact(&project.model, kind, &self.config.options))
    }

    /// Writes generated files to the output directory.
    fn write_output(&self, files: &[(String, String)]) -> Result<(), CompilerError> {
        create_dir(&self.config.out_dir)?;

        for (filename, content) in files {
            let path = self.config.out_dir.join(filename);
            if let Some(parent) = path.parent() {
                create_dir(parent)?;
            }
            std::fs::write(&path, content).map_err(|e| CompilerError::io(&path, e.to_string()))?;
        }

        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), CompilerError> {
    std::fs::create_dir_all(path).map_err(|e| CompilerError::io(path, e.to_string()))
}
