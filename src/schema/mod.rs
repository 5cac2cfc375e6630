//! Column typing and table schema generation.
//!
//! - `types`: the Type Mapper (column name to SQL type, reserved renames)
//! - `catalog`: per-entity keys, indexes and known columns
//! - `generator`: builds `TableSchema` values from headers and sample rows

pub mod catalog;
pub mod generator;
pub mod types;

use serde::Serialize;

pub use generator::{generate_schema, generate_table_schema, normalize_headers, static_schema, typed_table_schema, TableHints};
pub use types::{canonical_column_name, renamed_from_reserved, sql_type_for, SqlType, RESERVED_RENAMES};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: SqlType,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDef {
    pub name: String,
    pub columns: Vec<String>,
}

/// Ordered column list plus key and index suggestions for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Vec<String>,
    pub indexes: Vec<IndexDef>,
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_types(&self) -> Vec<SqlType> {
        self.columns.iter().map(|c| c.sql_type).collect()
    }
}

/// Double-quote an identifier for SQLite.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
