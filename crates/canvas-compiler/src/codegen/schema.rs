//! SQL schema generation from designed tables.
//!
//! Each table gets an implicit `id` primary key and `created_at`/`updated_at`
//! timestamps around its declared fields. Relations are not emitted.
//!
//! By default table names, field names and default literals are written
//! verbatim. [`SchemaOptions`] can turn on identifier quoting and literal
//! escaping; both are off unless asked for, since existing output depends on
//! the verbatim form.

use crate::model::{DatabaseField, DatabaseTable};

/// Columns every generated table carries in addition to its fields.
pub const IMPLICIT_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

const ID_COLUMN: &str = "  id UUID PRIMARY KEY DEFAULT gen_random_uuid()";
const CREATED_AT_COLUMN: &str = "  created_at TIMESTAMP DEFAULT NOW()";
const UPDATED_AT_COLUMN: &str = "  updated_at TIMESTAMP DEFAULT NOW()";

/// Schema generation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaOptions {
    /// Wrap table and field names in double quotes.
    pub quote_identifiers: bool,
    /// Double single quotes inside default literals.
    pub escape_literals: bool,
}

impl SchemaOptions {
    /// Quoting and escaping both on.
    pub fn strict() -> Self {
        Self {
            quote_identifiers: true,
            escape_literals: true,
        }
    }

    fn identifier(&self, name: &str) -> String {
        if self.quote_identifiers {
            format!("\"{}\"", name.replace('"', "\"\""))
        } else {
            name.to_string()
        }
    }

    fn literal(&self, value: &str) -> String {
        if self.escape_literals {
            format!("'{}'", value.replace('\'', "''"))
        } else {
            format!("'{}'", value)
        }
    }
}

/// Generates the schema with verbatim names and literals.
pub fn generate_schema(tables: &[DatabaseTable]) -> String {
    generate_schema_with(tables, &SchemaOptions::default())
}

/// Generates one `CREATE TABLE` statement per table, separated by blank lines.
pub fn generate_schema_with(tables: &[DatabaseTable], options: &SchemaOptions) -> String {
    if tables.is_empty() {
        return String::new();
    }

    let statements: Vec<String> = tables
        .iter()
        .map(|table| generate_table(table, options))
        .collect();

    let mut output = statements.join("\n\n");
    output.push('\n');
    output
}

/// Generates the statement for a single table.
pub fn generate_table(table: &DatabaseTable, options: &SchemaOptions) -> String {
    let mut columns: Vec<String> = Vec::with_capacity(table.fields.len() + 3);
    columns.push(ID_COLUMN.to_string());
    columns.extend(table.fields.iter().map(|field| generate_column(field, options)));
    columns.push(CREATED_AT_COLUMN.to_string());
    columns.push(UPDATED_AT_COLUMN.to_string());

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
        options.identifier(&table.name),
        columns.join(",\n")
    )
}

/// Column definition: name, type, then NOT NULL, UNIQUE and DEFAULT in that order.
fn generate_column(field: &DatabaseField, options: &SchemaOptions) -> String {
    let mut column = format!("  {} {}", options.identifier(&field.name), field.field_type.to_sql());

    if field.required {
        column.push_str(" NOT NULL");
    }
    if field.unique {
        column.push_str(" UNIQUE");
    }
    if let Some(value) = field.default_literal() {
        column.push_str(" DEFAULT ");
        column.push_str(&options.literal(value));
    }

    column
}
