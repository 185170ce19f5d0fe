//! Validation of the design model.
//!
//! The generators accept any model, so validation is a separate, optional
//! pass. Structural problems that make the output meaningless (duplicate ids,
//! unnamed or empty tables) are errors. Everything the generators silently
//! skip is reported as a [`Warning`].

mod graph;
mod sql;
mod structure;

use crate::diagnostic::{CompilerError, Warning};
use crate::model::DesignModel;

/// Validates the entire model, returning non-fatal findings.
pub fn validate_model(model: &DesignModel) -> Result<Vec<Warning>, CompilerError> {
    // Validate structure
    structure::validate_structure(model)?;

    let mut warnings = graph::check_logic_graph(&model.logic_blocks);
    warnings.extend(sql::check_schema_safety(&model.database_tables));

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Ok(warnings)
}
