// crates/lakehouse-config/src/sql.rs
// ============================================================================
// Module: SQL Statement Templates
// Description: Create-database, drop-table, and create-table statements.
// Purpose: Emit the bootstrap SQL a notebook runs against the Glue catalog.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Statements are fixed templates with settings interpolated verbatim. They
//! are emitted for a human or a downstream SQL executor; nothing here runs
//! them. Identifiers are validated at config load, so interpolation never
//! has to quote.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::LakehouseConfig;

// ============================================================================
// SECTION: Types
// ============================================================================

/// The three bootstrap statements for the default table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatements {
    /// `CREATE DATABASE IF NOT EXISTS <catalog>.<database>`.
    pub create_database: String,
    /// `DROP TABLE IF EXISTS <catalog>.<database>.<table>`.
    pub drop_table: String,
    /// `CREATE TABLE IF NOT EXISTS ...` with columns, properties, location.
    pub create_table: String,
}

impl SqlStatements {
    /// Returns `(label, statement)` pairs in execution order.
    #[must_use]
    pub fn labeled(&self) -> [(&'static str, &str); 3] {
        [
            ("create_database", self.create_database.as_str()),
            ("drop_table", self.drop_table.as_str()),
            ("create_table", self.create_table.as_str()),
        ]
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

impl LakehouseConfig {
    /// Builds the bootstrap statements from current settings.
    #[must_use]
    pub fn sql_statements(&self) -> SqlStatements {
        let full_table_name = self.full_table_name();
        SqlStatements {
            create_database: format!("CREATE DATABASE IF NOT EXISTS {}", self.database_identifier()),
            drop_table: format!("DROP TABLE IF EXISTS {full_table_name}"),
            create_table: self.create_table_statement(&full_table_name),
        }
    }

    /// Renders the create-table statement for `full_table_name`.
    fn create_table_statement(&self, full_table_name: &str) -> String {
        let columns = self
            .catalog
            .columns
            .iter()
            .map(|column| format!("    {} {}", column.name.trim(), column.data_type.trim()))
            .collect::<Vec<_>>()
            .join(",\n");
        format!(
            "CREATE TABLE IF NOT EXISTS {full_table_name} (\n{columns}\n)\nUSING iceberg\n\
             TBLPROPERTIES (\n    'table_type'='{table_type}',\n    \
             'format-version'='{format_version}'\n)\nLOCATION '{location}'",
            table_type = self.table_format.table_type.trim(),
            format_version = self.table_format.format_version.trim(),
            location = self.default_table_location(),
        )
    }
}
