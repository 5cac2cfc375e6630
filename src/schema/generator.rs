//! Schema Generator: table name plus a sample of rows to an ordered column
//! list, an optional primary key and a suggested index set.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::cli::types::DataType;
use crate::coerce::is_missing;
use crate::error::{NflError, Result};

use super::catalog;
use super::types::{canonical_column_name, check_rename_table, known_type, sql_type_for, SqlType};
use super::{quote_ident, ColumnDef, IndexDef, TableSchema};

/// Rows inspected when inferring the type of an unmapped column.
pub const SAMPLE_ROWS: usize = 1000;

/// Key columns and index hints for a table that is not one of the
/// extracted entities (rankings, for instance).
#[derive(Debug, Clone, Copy, Default)]
pub struct TableHints<'a> {
    pub natural_key: &'a [&'a str],
    pub indexes: &'a [(&'a str, &'a [&'a str])],
}

impl TableHints<'static> {
    pub fn for_data_type(data_type: DataType) -> Self {
        Self {
            natural_key: catalog::natural_key(data_type),
            indexes: catalog::index_columns(data_type),
        }
    }
}

/// Apply entity aliases and reserved-keyword renames to upstream headers.
///
/// Two headers ending up with the same name is a `SchemaConflict`.
pub fn normalize_headers(table: &str, aliases: &[(&str, &str)], headers: &[String]) -> Result<Vec<String>> {
    check_rename_table()?;

    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let mut seen = HashSet::with_capacity(headers.len());
    let mut normalized = Vec::with_capacity(headers.len());

    for header in headers {
        let trimmed = header.trim();
        let aliased = aliases
            .iter()
            .find(|(from, to)| *from == trimmed && !present.contains(to))
            .map(|(_, to)| *to)
            .unwrap_or(trimmed);
        let name = canonical_column_name(aliased).to_string();

        if name != trimmed {
            debug!(table, from = trimmed, to = %name, "Renamed column");
        }
        if !seen.insert(name.clone()) {
            return Err(NflError::SchemaConflict {
                table: table.to_string(),
                message: format!("column {trimmed} collides with existing column {name}"),
            });
        }
        normalized.push(name);
    }

    Ok(normalized)
}

/// Generate the schema of an extracted entity. With no headers the entity's
/// full known column list is used.
pub fn generate_schema(data_type: DataType, headers: &[String], rows: &[Vec<String>]) -> TableSchema {
    if headers.is_empty() {
        return static_schema(data_type);
    }
    generate_table_schema(
        data_type.table_name(),
        headers,
        rows,
        TableHints::for_data_type(data_type),
    )
}

/// Schema built purely from the Type Mapper and the entity catalog.
pub fn static_schema(data_type: DataType) -> TableSchema {
    let headers: Vec<String> = catalog::known_columns(data_type)
        .iter()
        .map(|c| c.to_string())
        .collect();
    let table = data_type.table_name();
    let hints = TableHints::for_data_type(data_type);

    let primary_key: Vec<String> = if hints.natural_key.iter().all(|k| headers.iter().any(|h| h == k)) {
        hints.natural_key.iter().map(|k| k.to_string()).collect()
    } else {
        Vec::new()
    };

    build_schema(table, &headers, |name| sql_type_for(name), primary_key, hints)
}

/// Generate a schema for `table` from normalized headers and raw rows.
///
/// The primary key is declared only when every key column exists and every
/// row has a unique, non-missing key; otherwise the table gets none.
pub fn generate_table_schema(
    table: &str,
    headers: &[String],
    rows: &[Vec<String>],
    hints: TableHints<'_>,
) -> TableSchema {
    let sample = &rows[..rows.len().min(SAMPLE_ROWS)];
    let primary_key = choose_primary_key(table, headers, rows, hints.natural_key);

    build_schema(
        table,
        headers,
        |name| match known_type(name) {
            Some(sql_type) => sql_type,
            None => {
                let idx = headers.iter().position(|h| h == name);
                idx.map(|i| infer_type(sample.iter().filter_map(|row| row.get(i).map(String::as_str))))
                    .unwrap_or(SqlType::Text)
            }
        },
        primary_key,
        hints,
    )
}

/// Schema for rows that are already typed, such as aggregates built from
/// another table.
pub fn typed_table_schema(
    table: &str,
    columns: &[(String, SqlType)],
    primary_key: Vec<String>,
    hints: TableHints<'_>,
) -> TableSchema {
    let headers: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
    build_schema(
        table,
        &headers,
        |name| {
            columns
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, t)| *t)
                .unwrap_or(SqlType::Text)
        },
        primary_key,
        hints,
    )
}

fn build_schema<F>(
    table: &str,
    headers: &[String],
    type_of: F,
    primary_key: Vec<String>,
    hints: TableHints<'_>,
) -> TableSchema
where
    F: Fn(&str) -> SqlType,
{
    let columns = headers
        .iter()
        .map(|name| ColumnDef {
            name: name.clone(),
            sql_type: type_of(name),
            nullable: !primary_key.contains(name),
        })
        .collect();

    let indexes = hints
        .indexes
        .iter()
        .filter(|(_, cols)| cols.iter().all(|c| headers.iter().any(|h| h == c)))
        .map(|(suffix, cols)| IndexDef {
            name: format!("idx_{table}_{suffix}"),
            columns: cols.iter().map(|c| c.to_string()).collect(),
        })
        .collect();

    TableSchema {
        name: table.to_string(),
        columns,
        primary_key,
        indexes,
    }
}

fn choose_primary_key(
    table: &str,
    headers: &[String],
    rows: &[Vec<String>],
    natural_key: &[&str],
) -> Vec<String> {
    if natural_key.is_empty() {
        return Vec::new();
    }

    let positions: Option<Vec<usize>> = natural_key
        .iter()
        .map(|k| headers.iter().position(|h| h == k))
        .collect();
    let Some(positions) = positions else {
        info!(table, "Natural key columns missing, creating table without primary key");
        return Vec::new();
    };

    let mut keys = HashSet::with_capacity(rows.len());
    for row in rows {
        let key: Option<Vec<&str>> = positions
            .iter()
            .map(|&i| row.get(i).map(String::as_str).filter(|v| !is_missing(v)))
            .collect();
        let unique = match key {
            Some(key) => keys.insert(key),
            None => false,
        };
        if !unique {
            info!(table, "Natural key is not unique, creating table without primary key");
            return Vec::new();
        }
    }

    natural_key.iter().map(|k| k.to_string()).collect()
}

/// Refine the `TEXT` default of an unmapped column from sample values.
pub fn infer_type<'a, I>(values: I) -> SqlType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_any = false;
    let mut all_integer = true;

    for raw in values {
        let value = raw.trim();
        if is_missing(value) {
            continue;
        }
        seen_any = true;
        if value.parse::<i64>().is_ok() {
            continue;
        }
        all_integer = false;
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => {}
            _ => return SqlType::Text,
        }
    }

    match (seen_any, all_integer) {
        (false, _) => SqlType::Text,
        (true, true) => SqlType::Integer,
        (true, false) => SqlType::Real,
    }
}

impl TableSchema {
    /// `CREATE TABLE IF NOT EXISTS` statement for this schema.
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let null = if c.nullable { "" } else { " NOT NULL" };
                format!("    {} {}{}", quote_ident(&c.name), c.sql_type.as_sql(), null)
            })
            .collect();

        if !self.primary_key.is_empty() {
            let key: Vec<String> = self.primary_key.iter().map(|k| quote_ident(k)).collect();
            parts.push(format!("    PRIMARY KEY ({})", key.join(", ")));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            quote_ident(&self.name),
            parts.join(",\n")
        )
    }
}

impl IndexDef {
    pub fn create_sql(&self, table: &str) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| quote_ident(c)).collect();
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            quote_ident(&self.name),
            quote_ident(table),
            cols.join(", ")
        )
    }
}
