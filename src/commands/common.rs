//! Shared helpers for command handlers: opening the database and printing
//! results.

use crate::config::Config;
use crate::error::Result;
use crate::extract::ExtractionSummary;
use crate::storage::{Database, QueryResult};

/// Resources every database command needs. The connection closes when the
/// context is dropped.
pub struct CommandContext {
    pub config: Config,
    pub db: Database,
}

impl CommandContext {
    pub fn open(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path)?;
        Ok(Self { config, db })
    }
}

/// Widest a printed cell gets before it is cut.
const MAX_CELL_WIDTH: usize = 40;

/// Render up to `limit` rows as an aligned text table.
pub fn format_table(result: &QueryResult, limit: usize) -> String {
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .take(limit)
        .map(|row| row.iter().map(|v| truncate(&v.to_string())).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{v:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&result.columns)];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    out.extend(cells.iter().map(|row| line(row)));
    if result.rows.len() > limit {
        out.push(format!("... {} more rows", result.rows.len() - limit));
    }
    out.join("\n")
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        return value.to_string();
    }
    let cut: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
    format!("{cut}…")
}

pub fn print_extraction_summary(summary: &ExtractionSummary) {
    let mut outcomes: Vec<_> = summary.outcomes.iter().collect();
    outcomes.sort_by_key(|o| (o.job.season, o.job.data_type));

    for outcome in outcomes {
        match &outcome.error {
            None => println!("✓ {}: {} records", outcome.job, outcome.records),
            Some(e) => println!("⚠ {}: {}", outcome.job, e),
        }
    }
    println!(
        "\n{} succeeded, {} failed, {} records loaded",
        summary.succeeded().count(),
        summary.failed().count(),
        summary.total_records()
    );
}
