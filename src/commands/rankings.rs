//! `refresh-raw-ecr`, `link-ecr`, `summarize` and `top`

use std::path::Path;

use crate::cli::types::{DataType, Season};
use crate::ecr::{link_rankings, refresh_raw_ecr, EcrRefreshSummary, LinkSummary};
use crate::error::{NflError, Result};
use crate::fantasy::{top_performers_sql, ScoringSystem};
use crate::storage::QueryResult;
use crate::summary::{create_season_summary, SummaryStats};

use super::common::{format_table, CommandContext};

pub fn handle_refresh_raw_ecr(ctx: &mut CommandContext, dir: Option<&Path>) -> Result<EcrRefreshSummary> {
    let dir = dir.unwrap_or(&ctx.config.ecr_dir).to_path_buf();
    let summary = refresh_raw_ecr(&mut ctx.db, &dir)?;

    println!(
        "✓ Loaded {} ranking rows from {} files",
        summary.total_records, summary.processed_files
    );
    if summary.failed_files > 0 {
        println!("⚠ {} files could not be parsed", summary.failed_files);
    }
    let v = &summary.verification;
    for year in &v.year_coverage {
        println!(
            "  {}: {} rows ({} before preseason, {} after)",
            year.year, year.total_records, year.before_preseason_records, year.after_preseason_records
        );
    }
    if v.missing_player_names + v.missing_positions + v.missing_ranks > 0 {
        println!(
            "⚠ missing values: {} names, {} positions, {} ranks",
            v.missing_player_names, v.missing_positions, v.missing_ranks
        );
    }
    Ok(summary)
}

pub fn handle_link_ecr(ctx: &mut CommandContext) -> Result<LinkSummary> {
    let summary = link_rankings(&mut ctx.db)?;
    let rate = if summary.total > 0 {
        summary.matched as f64 / summary.total as f64 * 100.0
    } else {
        0.0
    };
    println!(
        "✓ Linked {} of {} rankings to players ({rate:.1}%)",
        summary.matched, summary.total
    );
    Ok(summary)
}

pub fn handle_summarize(ctx: &mut CommandContext) -> Result<SummaryStats> {
    let stats = create_season_summary(&mut ctx.db)?;
    println!("✓ Built season summary: {} rows, {} columns", stats.rows, stats.columns);
    if !stats.with_rankings {
        println!("  (no linked rankings yet; run link-ecr to add them)");
    }
    Ok(stats)
}

#[derive(Debug, Clone)]
pub struct TopParams {
    pub season: Season,
    pub system: ScoringSystem,
    pub position: Option<String>,
    pub limit: usize,
    pub data_type: DataType,
}

pub fn handle_top(ctx: &CommandContext, params: TopParams) -> Result<QueryResult> {
    if !params.data_type.has_fantasy_points() {
        return Err(NflError::Config {
            message: format!("{} has no fantasy point columns", params.data_type),
        });
    }
    let table = params.data_type.table_name();
    if !ctx.db.table_exists(table)? {
        return Err(NflError::MissingTable {
            table: table.to_string(),
        });
    }

    let (sql, values) = top_performers_sql(
        table,
        params.system,
        params.season,
        params.position.as_deref(),
        params.limit,
    );
    let result = ctx.db.query_with_params(&sql, &values)?;

    if result.is_empty() {
        println!("No {} rows for season {}", table, params.season);
    } else {
        println!("{}", format_table(&result, params.limit));
    }
    Ok(result)
}
