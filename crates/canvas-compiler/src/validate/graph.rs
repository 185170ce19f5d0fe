//! Logic graph checks.
//!
//! Reports the parts of the graph the backend generator passes over, and
//! route values that cannot be embedded in its single-quoted strings.

use std::collections::HashSet;

use crate::diagnostic::Warning;
use crate::model::{BlockKind, LogicBlock};

/// Finds dangling connections, inert or unknown blocks, effect blocks no input
/// block is wired to, and unsafe route literals.
pub fn check_logic_graph(blocks: &[LogicBlock]) -> Vec<Warning> {
    let ids: HashSet<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
    let mut warnings = Vec::new();

    for block in blocks {
        for target in &block.connections {
            if !ids.contains(target.as_str()) {
                warnings.push(Warning::DanglingConnection {
                    block: block.id.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    let attached: HashSet<&str> = blocks
        .iter()
        .filter(|b| b.kind == BlockKind::Input)
        .flat_map(|b| b.connections.iter().map(String::as_str))
        .collect();

    for block in blocks {
        match &block.kind {
            BlockKind::Transform => warnings.push(Warning::InertTransform {
                block: block.id.clone(),
            }),
            BlockKind::Other(kind) => warnings.push(Warning::UnknownBlockKind {
                block: block.id.clone(),
                kind: kind.clone(),
            }),
            kind if kind.is_effect() && !attached.contains(block.id.as_str()) => {
                warnings.push(Warning::UnattachedBlock {
                    block: block.id.clone(),
                })
            }
            _ => {}
        }

        let literal = match block.kind {
            BlockKind::Input => block.data.path().map(|path| ("path", path)),
            BlockKind::Database => block.data.query().map(|query| ("query", query)),
            _ => None,
        };
        if let Some((field, value)) = literal {
            if breaks_js_literal(value) {
                warnings.push(Warning::UnsafeJsLiteral {
                    block: block.id.clone(),
                    field,
                });
            }
        }
    }

    warnings
}

/// Whether `value` cannot be placed verbatim between single quotes in JavaScript.
fn breaks_js_literal(value: &str) -> bool {
    value.contains(['\'', '\\', '\n', '\r'])
}
