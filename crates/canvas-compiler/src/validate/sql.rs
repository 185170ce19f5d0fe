//! Schema safety checks.
//!
//! Names and default literals go into the SQL verbatim, so anything that is
//! not a plain identifier is flagged here.

use crate::codegen::schema::IMPLICIT_COLUMNS;
use crate::diagnostic::Warning;
use crate::model::DatabaseTable;

/// Flags unsafe identifiers, unsafe default literals, shadowed implicit
/// columns and relations that will not be emitted.
pub fn check_schema_safety(tables: &[DatabaseTable]) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for table in tables {
        if !is_plain_identifier(&table.name) {
            warnings.push(Warning::UnsafeIdentifier {
                kind: "table",
                name: table.name.clone(),
            });
        }

        for field in &table.fields {
            if !is_plain_identifier(&field.name) {
                warnings.push(Warning::UnsafeIdentifier {
                    kind: "field",
                    name: field.name.clone(),
                });
            }

            if IMPLICIT_COLUMNS.contains(&field.name.to_ascii_lowercase().as_str()) {
                warnings.push(Warning::ShadowsImplicitColumn {
                    table: table.name.clone(),
                    field: field.name.clone(),
                });
            }

            if field.default_literal().is_some_and(|v| v.contains('\'')) {
                warnings.push(Warning::UnsafeDefaultLiteral {
                    table: table.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        if !table.relations.is_empty() {
            warnings.push(Warning::RelationsNotEmitted {
                table: table.name.clone(),
                count: table.relations.len(),
            });
        }
    }

    warnings
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DatabaseField, DatabaseRelation, FieldType, RelationKind};

    #[test]
    fn test_plain_identifiers() {
        assert!(is_plain_identifier("users"));
        assert!(is_plain_identifier("_audit_log2"));
        assert!(!is_plain_identifier("2fa"));
        assert!(!is_plain_identifier("users; DROP TABLE x"));
        assert!(!is_plain_identifier(""));
    }

    #[test]
    fn test_schema_findings() {
        let mut table = DatabaseTable::new(
            "t",
            "users",
            vec![
                DatabaseField::new("f1", "ID", FieldType::Uuid),
                DatabaseField::new("f2", "bio", FieldType::String).with_default("it's me"),
                DatabaseField::new("f3", "e-mail", FieldType::String),
            ],
        );
        table.relations.push(DatabaseRelation {
            id: "r".into(),
            from: "users".into(),
            to: "posts".into(),
            kind: RelationKind::ManyToMany,
        });

        let warnings = check_schema_safety(&[table]);
        assert_eq!(
            warnings,
            vec![
                Warning::ShadowsImplicitColumn {
                    table: "users".into(),
                    field: "ID".into()
                },
                Warning::UnsafeDefaultLiteral {
                    table: "users".into(),
                    field: "bio".into()
                },
                Warning::UnsafeIdentifier {
                    kind: "field",
                    name: "e-mail".into()
                },
                Warning::RelationsNotEmitted {
                    table: "users".into(),
                    count: 1
                },
            ]
        );
    }
}
