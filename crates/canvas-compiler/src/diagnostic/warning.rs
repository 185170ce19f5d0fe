//! Non-fatal findings from model validation.
//!
//! None of these stop code generation; the generators tolerate every one of
//! them. They exist so `check` can tell the user why some part of the design
//! has no effect on the output.

use thiserror::Error;

/// A validation finding that does not block generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("logic block '{block}' is connected to '{target}', which does not exist")]
    DanglingConnection {
        block: String,
        target: String,
    },

    #[error("transform block '{block}' has no effect on the generated server")]
    InertTransform {
        block: String,
    },

    #[error("logic block '{block}' is not attached to any input block")]
    UnattachedBlock {
        block: String,
    },

    #[error("logic block '{block}' has unknown type '{kind}' and has no effect on the generated server")]
    UnknownBlockKind {
        block: String,
        kind: String,
    },

    #[error("{field} of logic block '{block}' contains a quote, backslash or line break and will break the generated JavaScript string")]
    UnsafeJsLiteral {
        block: String,
        field: &'static str,
    },

    #[error("table '{table}' declares {count} relation(s); relations are not emitted as foreign keys")]
    RelationsNotEmitted {
        table: String,
        count: usize,
    },

    #[error("{kind} name '{name}' contains characters that will corrupt the generated SQL")]
    UnsafeIdentifier {
        kind: &'static str,
        name: String,
    },

    #[error("default value for '{table}.{field}' contains a single quote and will break the SQL literal")]
    UnsafeDefaultLiteral {
        table: String,
        field: String,
    },

    #[error("field '{field}' in table '{table}' shadows the implicit '{field}' column")]
    ShadowsImplicitColumn {
        table: String,
        field: String,
    },
}
