//! Structure validation for the design model.
//!
//! Checks the invariants the editor normally enforces: unique ids per
//! collection, and tables that have a name and at least one named field.

use std::collections::HashSet;

use crate::diagnostic::CompilerError;
use crate::model::{DatabaseTable, DesignModel};

/// Validates the structure of the design model.
pub fn validate_structure(model: &DesignModel) -> Result<(), CompilerError> {
    if let Some(id) = first_duplicate(model.components.iter().map(|c| c.id.as_str())) {
        return Err(CompilerError::DuplicateComponentId { id: id.to_string() });
    }

    if let Some(id) = first_duplicate(model.logic_blocks.iter().map(|b| b.id.as_str())) {
        return Err(CompilerError::DuplicateBlockId { id: id.to_string() });
    }

    if let Some(id) = first_duplicate(model.database_tables.iter().map(|t| t.id.as_str())) {
        return Err(CompilerError::DuplicateTableId { id: id.to_string() });
    }

    for table in &model.database_tables {
        validate_table(table)?;
    }

    Ok(())
}

/// Validates a table has a name and named, uniquely identified fields.
fn validate_table(table: &DatabaseTable) -> Result<(), CompilerError> {
    if table.name.trim().is_empty() {
        return Err(CompilerError::UnnamedTable { id: table.id.clone() });
    }

    if table.fields.is_empty() {
        return Err(CompilerError::EmptyTable { table: table.name.clone() });
    }

    if let Some(id) = first_duplicate(table.fields.iter().map(|f| f.id.as_str())) {
        return Err(CompilerError::DuplicateFieldId {
            table: table.name.clone(),
            id: id.to_string(),
        });
    }

    for field in &table.fields {
        if field.name.trim().is_empty() {
            return Err(CompilerError::UnnamedField {
                table: table.name.clone(),
                field: field.id.clone(),
            });
        }
    }

    Ok(())
}

fn first_duplicate<'a>(mut ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.find(|id| !seen.insert(*id))
}
