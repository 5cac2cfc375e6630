//! Table creation, loading, season-scoped refresh and ad-hoc queries

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info, warn};

use super::models::*;
use super::schema::{table_exists, table_info, Database};
use crate::coerce::CoercionReport;
use crate::error::{NflError, Result};
use crate::schema::{quote_ident, renamed_from_reserved, ColumnDef, SqlType, TableSchema};
use crate::value::Value;

/// Season type recorded in the refresh log for whole-season loads.
pub const ALL_SEASON_TYPES: &str = "ALL";

impl Database {
    /// Drop `schema.name` if present and create it from `schema`.
    pub fn create_or_replace_table(&mut self, schema: &TableSchema) -> Result<()> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        replace_table(&tx, schema)?;
        tx.commit()?;
        info!(table = %schema.name, columns = schema.columns.len(), "Created table");
        Ok(())
    }

    /// Create the table if it is missing, otherwise append any new columns.
    /// Returns the table's effective schema.
    pub fn ensure_table(&mut self, schema: &TableSchema) -> Result<TableSchema> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let effective = ensure_table(&tx, schema)?;
        tx.commit()?;
        Ok(effective)
    }

    /// Append rows to an existing (or newly created) table in one transaction.
    pub fn bulk_load(&mut self, data: &TableData) -> Result<usize> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let effective = ensure_table(&tx, &data.schema)?;
        let (rows, _) = reconcile_rows(&data.schema, &effective, &data.rows);
        let loaded = insert_rows(&tx, &data.schema, &rows)?;
        tx.commit()?;
        info!(table = %data.schema.name, rows = loaded, "Loaded rows");
        Ok(loaded)
    }

    /// Replace the rows covered by `scope` with `data`, atomically.
    ///
    /// On failure the transaction is rolled back, a FAILED entry is written to
    /// the refresh log and `RefreshFailed` is returned; existing rows stay.
    pub fn refresh(&mut self, data: &TableData, scope: RefreshScope) -> Result<usize> {
        let table = data.table_name().to_string();
        match self.refresh_in_transaction(data, scope) {
            Ok(loaded) => {
                self.log_refresh(&table, scope, RefreshStatus::Success, None, loaded as i64)?;
                info!(table = %table, scope = %scope, rows = loaded, "Refreshed table");
                Ok(loaded)
            }
            Err(e) => {
                let cause = e.to_string();
                warn!(table = %table, scope = %scope, error = %cause, "Refresh rolled back");
                if let Err(log_err) = self.log_refresh(&table, scope, RefreshStatus::Failed, Some(&cause), 0) {
                    warn!(table = %table, error = %log_err, "Could not record failed refresh");
                }
                Err(NflError::RefreshFailed {
                    table,
                    scope: scope.to_string(),
                    cause,
                })
            }
        }
    }

    fn refresh_in_transaction(&mut self, data: &TableData, scope: RefreshScope) -> Result<usize> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let table = quote_ident(&data.schema.name);

        let loaded = match scope {
            RefreshScope::All => {
                replace_table(&tx, &data.schema)?;
                insert_rows(&tx, &data.schema, &data.rows)?
            }
            RefreshScope::Season(season) => {
                let effective = ensure_table(&tx, &data.schema)?;
                let deleted = tx.execute(&format!("DELETE FROM {table} WHERE season = ?1"), params![season.as_i64()])?;
                debug!(table = %data.schema.name, deleted, "Cleared season");
                let (rows, recast) = reconcile_rows(&data.schema, &effective, &data.rows);
                log_recast(&data.schema.name, &recast);
                insert_rows(&tx, &data.schema, &rows)?
            }
            RefreshScope::SeasonWeek(season, week) => {
                let effective = ensure_table(&tx, &data.schema)?;
                let deleted = tx.execute(
                    &format!("DELETE FROM {table} WHERE season = ?1 AND week = ?2"),
                    params![season.as_i64(), week.as_i64()],
                )?;
                debug!(table = %data.schema.name, deleted, "Cleared week");
                let (rows, recast) = reconcile_rows(&data.schema, &effective, &data.rows);
                log_recast(&data.schema.name, &recast);
                insert_rows(&tx, &data.schema, &rows)?
            }
        };

        tx.commit()?;
        Ok(loaded)
    }

    /// Append an entry to `data_refresh_log`.
    pub fn log_refresh(
        &mut self,
        table: &str,
        scope: RefreshScope,
        status: RefreshStatus,
        error_message: Option<&str>,
        records_processed: i64,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO data_refresh_log
             (table_name, season, week, season_type, status, error_message, records_processed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                table,
                scope.season().map(|s| s.as_i64()).unwrap_or(0),
                scope.week().map(|w| w.as_i64()),
                ALL_SEASON_TYPES,
                status.as_str(),
                error_message,
                records_processed,
            ],
        )?;
        Ok(())
    }

    /// Most recent log entry for a table and season (and week, if given).
    pub fn last_refresh(&self, table: &str, season: i64, week: Option<i64>) -> Result<Option<RefreshLogEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT id, table_name, season, week, season_type, refresh_date, status,
                        error_message, records_processed
                 FROM data_refresh_log
                 WHERE table_name = ?1 AND season = ?2 AND week IS ?3
                 ORDER BY id DESC LIMIT 1",
                params![table, season, week],
                read_log_entry,
            )
            .optional()?;
        Ok(entry)
    }

    pub fn recent_refreshes(&self, limit: usize) -> Result<Vec<RefreshLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, table_name, season, week, season_type, refresh_date, status,
                    error_message, records_processed
             FROM data_refresh_log ORDER BY id DESC LIMIT ?1",
        )?;
        let entries = stmt
            .query_map(params![limit as i64], read_log_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Run a query and decode each cell with its column's declared type.
    pub fn query(&self, sql: &str) -> Result<QueryResult> {
        self.query_with_params(sql, &[])
    }

    pub fn query_with_params(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let mut stmt = self.conn.prepare(sql).map_err(query_error)?;

        let (columns, declared): (Vec<String>, Vec<Option<SqlType>>) = stmt
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.decl_type().and_then(SqlType::from_declared)))
            .unzip();

        let mut rows = stmt.query(params_from_iter(params.iter())).map_err(query_error)?;
        let mut result = QueryResult {
            columns,
            rows: Vec::new(),
        };
        while let Some(row) = rows.next().map_err(query_error)? {
            let mut values = Vec::with_capacity(declared.len());
            for (i, decl) in declared.iter().enumerate() {
                values.push(Value::from_sql_ref(row.get_ref(i)?, *decl));
            }
            result.rows.push(values);
        }

        Ok(result)
    }
}

fn read_log_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<RefreshLogEntry> {
    let status: String = row.get(6)?;
    Ok(RefreshLogEntry {
        id: row.get(0)?,
        table_name: row.get(1)?,
        season: row.get(2)?,
        week: row.get(3)?,
        season_type: row.get(4)?,
        refresh_date: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        status: RefreshStatus::parse(&status).unwrap_or(RefreshStatus::Failed),
        error_message: row.get(7)?,
        records_processed: row.get::<_, Option<i64>>(8)?.unwrap_or(0),
    })
}

/// Map a SQLite error to `Query`, pointing at the stored name when the
/// query used a reserved source column name.
fn query_error(err: rusqlite::Error) -> NflError {
    let message = err.to_string();
    let hint = message
        .split("no such column: ")
        .nth(1)
        .map(|rest| rest.split_whitespace().next().unwrap_or(rest))
        .and_then(|column| {
            let bare = column.rsplit('.').next().unwrap_or(column);
            renamed_from_reserved(bare).map(|renamed| format!(" ({bare} is stored as {renamed})"))
        })
        .unwrap_or_default();

    NflError::Query {
        message: format!("{message}{hint}"),
    }
}

fn replace_table(conn: &Connection, schema: &TableSchema) -> Result<()> {
    conn.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(&schema.name)), [])?;
    conn.execute(&schema.create_sql(), [])?;
    create_indexes(conn, schema)?;
    Ok(())
}

fn create_indexes(conn: &Connection, schema: &TableSchema) -> Result<()> {
    for index in &schema.indexes {
        conn.execute(&index.create_sql(&schema.name), [])?;
    }
    Ok(())
}

/// Create the table when missing; otherwise add incoming columns it lacks.
/// Existing column types are never changed.
fn ensure_table(conn: &Connection, schema: &TableSchema) -> Result<TableSchema> {
    if !table_exists(conn, &schema.name)? {
        conn.execute(&schema.create_sql(), [])?;
        create_indexes(conn, schema)?;
        info!(table = %schema.name, columns = schema.columns.len(), "Created table");
        return Ok(schema.clone());
    }

    let mut existing = table_info(conn, &schema.name)?;
    let declared_key: Vec<&str> = existing
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    let same_key = declared_key.len() == schema.primary_key.len()
        && declared_key.iter().all(|k| schema.primary_key.iter().any(|p| p == k));
    if !declared_key.is_empty() && !same_key {
        warn!(
            table = %schema.name,
            key = ?declared_key,
            "Incoming rows do not fit the declared primary key, rebuilding table without it"
        );
        drop_primary_key(conn, &schema.name, &existing)?;
        existing = table_info(conn, &schema.name)?;
    }

    let mut columns: Vec<ColumnDef> = existing
        .iter()
        .map(|c| ColumnDef {
            name: c.name.clone(),
            sql_type: c.sql_type().unwrap_or(SqlType::Text),
            nullable: !c.not_null,
        })
        .collect();

    for column in &schema.columns {
        if existing.iter().any(|c| c.name == column.name) {
            continue;
        }
        conn.execute(
            &format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                quote_ident(&schema.name),
                quote_ident(&column.name),
                column.sql_type.as_sql()
            ),
            [],
        )?;
        warn!(table = %schema.name, column = %column.name, "Added new upstream column");
        columns.push(ColumnDef {
            nullable: true,
            ..column.clone()
        });
    }

    create_indexes(conn, schema)?;

    Ok(TableSchema {
        name: schema.name.clone(),
        primary_key: existing
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.clone())
            .collect(),
        columns,
        indexes: schema.indexes.clone(),
    })
}

/// Rebuild `table` with the same columns and rows but no primary key or
/// NOT NULL constraints. Indexes are recreated by the caller.
fn drop_primary_key(conn: &Connection, table: &str, existing: &[ColumnInfo]) -> Result<()> {
    let staging = format!("{table}__rebuild");
    let rebuilt = TableSchema {
        name: staging.clone(),
        columns: existing
            .iter()
            .map(|c| ColumnDef {
                name: c.name.clone(),
                sql_type: c.sql_type().unwrap_or(SqlType::Text),
                nullable: true,
            })
            .collect(),
        primary_key: Vec::new(),
        indexes: Vec::new(),
    };
    let names = existing
        .iter()
        .map(|c| quote_ident(&c.name))
        .collect::<Vec<_>>()
        .join(", ");

    conn.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(&staging)), [])?;
    conn.execute(&rebuilt.create_sql(), [])?;
    conn.execute(
        &format!(
            "INSERT INTO {} ({names}) SELECT {names} FROM {}",
            quote_ident(&staging),
            quote_ident(table)
        ),
        [],
    )?;
    conn.execute(&format!("DROP TABLE {}", quote_ident(table)), [])?;
    conn.execute(
        &format!("ALTER TABLE {} RENAME TO {}", quote_ident(&staging), quote_ident(table)),
        [],
    )?;
    Ok(())
}

/// Re-coerce incoming values whose column is declared with a different type
/// in the existing table. Returns the rows plus a count of values that no
/// longer fit.
fn reconcile_rows(incoming: &TableSchema, existing: &TableSchema, rows: &[Vec<Value>]) -> (Vec<Vec<Value>>, CoercionReport) {
    let targets: Vec<Option<SqlType>> = incoming
        .columns
        .iter()
        .map(|c| {
            existing
                .columns
                .iter()
                .find(|e| e.name == c.name)
                .map(|e| e.sql_type)
                .filter(|t| *t != c.sql_type)
        })
        .collect();

    let mut report = CoercionReport::default();
    if targets.iter().all(Option::is_none) {
        return (rows.to_vec(), report);
    }

    let mut skipped = vec![0usize; targets.len()];
    let reconciled = rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, value)| match targets.get(i).copied().flatten() {
                    Some(target) => {
                        let coerced = value.clone().recast(target);
                        if coerced.is_skipped() {
                            skipped[i] += 1;
                        }
                        coerced.into_value()
                    }
                    None => value.clone(),
                })
                .collect()
        })
        .collect();

    for (column, count) in incoming.columns.iter().zip(skipped) {
        report.record(&column.name, count);
    }
    (reconciled, report)
}

fn log_recast(table: &str, report: &CoercionReport) {
    if report.total_skipped() > 0 {
        warn!(table, skipped = report.total_skipped(), "Values did not fit existing column types and were stored as NULL");
    }
}

/// Insert rows in schema column order. A row with the wrong number of values
/// is an error, which rolls back the surrounding transaction.
fn insert_rows(conn: &Connection, schema: &TableSchema, rows: &[Vec<Value>]) -> Result<usize> {
    if schema.columns.is_empty() {
        return Ok(0);
    }

    let names: Vec<String> = schema.columns.iter().map(|c| quote_ident(&c.name)).collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(&schema.name),
        names.join(", "),
        placeholders.join(", ")
    );

    let mut stmt = conn.prepare(&sql)?;
    for (n, row) in rows.iter().enumerate() {
        if row.len() != names.len() {
            return Err(NflError::SchemaConflict {
                table: schema.name.clone(),
                message: format!("row {n} has {} values, expected {}", row.len(), names.len()),
            });
        }
        stmt.execute(params_from_iter(row.iter()))?;
    }

    Ok(rows.len())
}
