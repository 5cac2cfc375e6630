//! `query`: run SQL and print or export the result

use std::path::PathBuf;

use crate::error::Result;
use crate::storage::ExportSummary;

use super::common::{format_table, CommandContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlSource {
    Inline(String),
    File(PathBuf),
}

impl SqlSource {
    pub fn read(&self) -> Result<String> {
        match self {
            SqlSource::Inline(sql) => Ok(sql.clone()),
            SqlSource::File(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

#[derive(Debug)]
pub struct QueryParams {
    pub sql: SqlSource,
    pub output: Option<PathBuf>,
    pub limit: usize,
}

/// What a query run produced, for the caller to report.
#[derive(Debug)]
pub enum QueryOutcome {
    Printed { rows: usize },
    Exported(ExportSummary),
}

pub fn handle_query(ctx: &CommandContext, params: QueryParams) -> Result<QueryOutcome> {
    let sql = params.sql.read()?;

    if let Some(output) = &params.output {
        let summary = ctx.db.export_query(&sql, output)?;
        println!("✓ Exported {} rows to {}", summary.rows, summary.path.display());
        return Ok(QueryOutcome::Exported(summary));
    }

    let result = ctx.db.query(&sql)?;
    if result.columns.is_empty() {
        println!("✓ Statement executed");
    } else {
        println!("{}", format_table(&result, params.limit));
        println!("\n{} rows", result.rows.len());
    }
    Ok(QueryOutcome::Printed {
        rows: result.rows.len(),
    })
}
