//! `validate`, `schema` and `stats`

use crate::cli::types::DataType;
use crate::error::{NflError, Result};
use crate::storage::QualityReport;

use super::common::CommandContext;

const REFRESH_LOG_TABLE: &str = "data_refresh_log";

/// Quality report of every data table.
pub fn handle_validate(ctx: &CommandContext) -> Result<Vec<QualityReport>> {
    let mut reports = Vec::new();
    for table in ctx.db.list_tables()? {
        if table == REFRESH_LOG_TABLE {
            continue;
        }
        let report = ctx.db.validate_data_quality(&table)?;

        println!("{}: {} rows, {} columns", report.table, report.total_rows, report.total_columns);
        for check in report.high_null_columns() {
            println!(
                "  ⚠ {} is {:.1}% NULL ({} rows)",
                check.column, check.null_percentage, check.null_count
            );
        }
        match report.duplicate_rows {
            Some(0) => println!("  ✓ no duplicate rows"),
            Some(n) => println!("  ⚠ {n} duplicate rows"),
            None => {}
        }
        reports.push(report);
    }

    if reports.is_empty() {
        println!("No tables loaded yet");
    }
    Ok(reports)
}

pub fn handle_schema(ctx: &CommandContext, data_type: Option<DataType>) -> Result<()> {
    let tables = match data_type {
        Some(data_type) => {
            let table = data_type.table_name();
            if !ctx.db.table_exists(table)? {
                return Err(NflError::MissingTable {
                    table: table.to_string(),
                });
            }
            vec![(table.to_string(), ctx.db.table_info(table)?)]
        }
        None => ctx.db.schema_info()?,
    };

    for (table, columns) in tables {
        println!("{table}");
        for column in columns {
            let key = if column.primary_key { " PRIMARY KEY" } else { "" };
            println!("  {:<32} {}{key}", column.name, column.declared_type);
        }
        println!();
    }
    Ok(())
}

pub fn handle_stats(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.db.database_stats()?;

    if let Some(path) = ctx.db.path() {
        println!("Database: {}\n", path.display());
    }
    println!("{:<20} {:>10}  seasons", "table", "records");
    for table in &stats.tables {
        let seasons = match (table.min_season, table.max_season, table.season_count) {
            (Some(min), Some(max), Some(count)) => format!("{min}-{max} ({count})"),
            _ => "-".to_string(),
        };
        println!("{:<20} {:>10}  {seasons}", table.name, table.records);
    }

    if !stats.recent_refreshes.is_empty() {
        println!("\nRecent refreshes:");
        for entry in &stats.recent_refreshes {
            let week = entry.week.map(|w| format!(" week {w}")).unwrap_or_default();
            println!(
                "  {} {} season {}{week}: {} ({} records){}",
                entry.refresh_date,
                entry.table_name,
                entry.season,
                entry.status.as_str(),
                entry.records_processed,
                entry
                    .error_message
                    .as_ref()
                    .map(|m| format!(" - {m}"))
                    .unwrap_or_default()
            );
        }
    }
    Ok(())
}
