//! Database-wide statistics, data quality checks and schema listing

use super::{models::*, schema::Database};
use crate::error::{NflError, Result};
use crate::schema::quote_ident;

/// Tables whose duplicate rows indicate a broken load.
const DUPLICATE_CHECKED_TABLES: [&str; 3] = ["teams", "players", "schedules"];

/// Refresh log entries included in `database_stats`.
const RECENT_REFRESHES: usize = 10;

impl Database {
    /// Record counts and season coverage of every table.
    pub fn database_stats(&self) -> Result<DatabaseStats> {
        let mut tables = Vec::new();

        for name in self.list_tables()? {
            let records = self.row_count(&name)?;
            let has_season = self.table_info(&name)?.iter().any(|c| c.name == "season");

            let (min_season, max_season, season_count) = if has_season && name != "data_refresh_log" {
                self.conn.query_row(
                    &format!(
                        "SELECT MIN(season), MAX(season), COUNT(DISTINCT season) FROM {}",
                        quote_ident(&name)
                    ),
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )?
            } else {
                (None, None, None)
            };

            tables.push(TableStats {
                name,
                records,
                min_season,
                max_season,
                season_count,
            });
        }

        Ok(DatabaseStats {
            tables,
            recent_refreshes: self.recent_refreshes(RECENT_REFRESHES)?,
        })
    }

    /// Row and column counts, NULL rates of numeric columns, and duplicate
    /// rows for the reference-style tables.
    pub fn validate_data_quality(&self, table: &str) -> Result<QualityReport> {
        if !self.table_exists(table)? {
            return Err(NflError::MissingTable {
                table: table.to_string(),
            });
        }

        let columns = self.table_info(table)?;
        let total_rows = self.row_count(table)?;
        let quoted = quote_ident(table);

        let mut null_checks = Vec::new();
        for column in columns.iter().filter(|c| c.sql_type().is_some_and(|t| t.is_numeric())) {
            let null_count: i64 = self.conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {quoted} WHERE {} IS NULL",
                    quote_ident(&column.name)
                ),
                [],
                |row| row.get(0),
            )?;
            let null_percentage = if total_rows > 0 {
                null_count as f64 / total_rows as f64 * 100.0
            } else {
                0.0
            };
            null_checks.push(NullCheck {
                column: column.name.clone(),
                null_count,
                null_percentage,
            });
        }

        let duplicate_rows = if DUPLICATE_CHECKED_TABLES.contains(&table) {
            let distinct: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM (SELECT DISTINCT * FROM {quoted})"),
                [],
                |row| row.get(0),
            )?;
            Some(total_rows - distinct)
        } else {
            None
        };

        Ok(QualityReport {
            table: table.to_string(),
            total_rows,
            total_columns: columns.len(),
            null_checks,
            duplicate_rows,
        })
    }

    /// Column listing of every table.
    pub fn schema_info(&self) -> Result<Vec<(String, Vec<ColumnInfo>)>> {
        self.list_tables()?
            .into_iter()
            .map(|name| {
                let columns = self.table_info(&name)?;
                Ok((name, columns))
            })
            .collect()
    }
}
