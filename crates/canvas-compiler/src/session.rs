//! Design session state.
//!
//! A [`DesignSession`] owns the model being edited and the code generated from
//! it. Every mutation re-runs the generator for the slice of the model it
//! touched, so [`DesignSession::generated`] is always current. The generators
//! never see the session; they get plain slices.

use crate::codegen::{self, ArtifactKind, GenerateOptions, GeneratedCode};
use crate::model::{
    BlockKind, ComponentKind, DatabaseTable, DesignModel, LogicBlock, PlacedComponent, Position, ProjectFile,
};

/// Mutable editing state for one project.
#[derive(Debug, Clone)]
pub struct DesignSession {
    model: DesignModel,
    generated: GeneratedCode,
    options: GenerateOptions,
    next_id: u64,
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::new(GenerateOptions::default())
    }
}

impl DesignSession {
    /// Creates an empty session with freshly generated artifacts.
    pub fn new(options: GenerateOptions) -> Self {
        Self::with_model(DesignModel::new(), options)
    }

    /// Creates a session around an existing model.
    pub fn with_model(model: DesignModel, options: GenerateOptions) -> Self {
        let generated = codegen::generate(&model, &options);
        Self {
            model,
            generated,
            options,
            next_id: 1,
        }
    }

    /// Opens a saved project.
    ///
    /// Stored generated code is kept as-is (it may contain manual edits); a
    /// project saved without any is generated from its model.
    pub fn from_project(project: ProjectFile, options: GenerateOptions) -> Self {
        match project.generated_code {
            Some(generated) => Self {
                model: project.model,
                generated,
                options,
                next_id: 1,
            },
            None => Self::with_model(project.model, options),
        }
    }

    pub fn model(&self) -> &DesignModel {
        &self.model
    }

    pub fn generated(&self) -> &GeneratedCode {
        &self.generated
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Snapshot of the session as a project document.
    pub fn to_project_file(&self, name: impl Into<String>) -> ProjectFile {
        let mut project = ProjectFile::new(name, self.model.clone());
        project.generated_code = Some(self.generated.clone());
        project
    }

    // =========================================================================
    // Generated code
    // =========================================================================

    /// Re-runs one generator.
    pub fn regenerate(&mut self, kind: ArtifactKind) {
        let code = codegen::generate_artifact(&self.model, kind, &self.options);
        self.generated.set(kind, code);
    }

    /// Re-runs all generators, discarding manual edits.
    pub fn regenerate_all(&mut self) {
        self.generated = codegen::generate(&self.model, &self.options);
    }

    /// Stores edited code for one artifact. The next model change touching
    /// that artifact regenerates it.
    pub fn update_generated_code(&mut self, kind: ArtifactKind, code: impl Into<String>) {
        self.generated.set(kind, code.into());
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Drops a new component with canvas defaults, returning its id.
    pub fn place_component(&mut self, kind: ComponentKind, position: Position) -> String {
        let id = self.fresh_id(kind.as_str());
        self.add_component(PlacedComponent::new(id.clone(), kind, position));
        id
    }

    pub fn add_component(&mut self, component: PlacedComponent) {
        self.model.components.push(component);
        self.regenerate(ArtifactKind::Frontend);
    }

    /// Applies `edit` to the component with `id`. Returns `false` if none matched.
    pub fn update_component(&mut self, id: &str, edit: impl FnOnce(&mut PlacedComponent)) -> bool {
        let Some(component) = self.model.components.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        edit(component);
        self.regenerate(ArtifactKind::Frontend);
        true
    }

    pub fn remove_component(&mut self, id: &str) -> bool {
        let before = self.model.components.len();
        self.model.components.retain(|c| c.id != id);
        if self.model.components.len() == before {
            return false;
        }
        self.regenerate(ArtifactKind::Frontend);
        true
    }

    // =========================================================================
    // Logic blocks
    // =========================================================================

    /// Adds a new block the way the palette does, returning its id.
    pub fn place_logic_block(&mut self, kind: BlockKind, position: Position) -> String {
        let id = self.fresh_id(kind.as_str());
        self.add_logic_block(LogicBlock::new(id.clone(), kind, position));
        id
    }

    pub fn add_logic_block(&mut self, block: LogicBlock) {
        self.model.logic_blocks.push(block);
        self.regenerate(ArtifactKind::Backend);
    }

    pub fn update_logic_block(&mut self, id: &str, edit: impl FnOnce(&mut LogicBlock)) -> bool {
        let Some(block) = self.model.logic_blocks.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        edit(block);
        self.regenerate(ArtifactKind::Backend);
        true
    }

    /// Draws an edge `from -> to`. Both blocks must exist; duplicate edges are ignored.
    pub fn connect(&mut self, from: &str, to: &str) -> bool {
        if !self.model.logic_blocks.iter().any(|b| b.id == to) {
            return false;
        }
        let Some(block) = self.model.logic_blocks.iter_mut().find(|b| b.id == from) else {
            return false;
        };
        if !block.connect_to(to) {
            return false;
        }
        self.regenerate(ArtifactKind::Backend);
        true
    }

    /// Removes an edge `from -> to`.
    pub fn disconnect(&mut self, from: &str, to: &str) -> bool {
        let Some(block) = self.model.logic_blocks.iter_mut().find(|b| b.id == from) else {
            return false;
        };
        let before = block.connections.len();
        block.connections.retain(|c| c != to);
        if block.connections.len() == before {
            return false;
        }
        self.regenerate(ArtifactKind::Backend);
        true
    }

    /// Removes a block and every connection pointing at it.
    pub fn remove_logic_block(&mut self, id: &str) -> bool {
        let before = self.model.logic_blocks.len();
        self.model.logic_blocks.retain(|b| b.id != id);
        if self.model.logic_blocks.len() == before {
            return false;
        }
        for block in &mut self.model.logic_blocks {
            block.connections.retain(|c| c != id);
        }
        self.regenerate(ArtifactKind::Backend);
        true
    }

    // =========================================================================
    // Tables
    // =========================================================================

    pub fn add_table(&mut self, table: DatabaseTable) {
        self.model.database_tables.push(table);
        self.regenerate(ArtifactKind::Database);
    }

    pub fn update_table(&mut self, id: &str, edit: impl FnOnce(&mut DatabaseTable)) -> bool {
        let Some(table) = self.model.database_tables.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        edit(table);
        self.regenerate(ArtifactKind::Database);
        true
    }

    pub fn remove_table(&mut self, id: &str) -> bool {
        let before = self.model.database_tables.len();
        self.model.database_tables.retain(|t| t.id != id);
        if self.model.database_tables.len() == before {
            return false;
        }
        self.regenerate(ArtifactKind::Database);
        true
    }

    /// Next `<prefix>-<n>` id not used by any component or block.
    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            let id = format!("{}-{}", prefix, self.next_id);
            self.next_id += 1;
            let taken = self.model.components.iter().any(|c| c.id == id)
                || self.model.logic_blocks.iter().any(|b| b.id == id);
            if !taken {
                return id;
            }
        }
    }
}
