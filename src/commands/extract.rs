//! `extract`, `refresh-season` and `refresh-week`

use crate::cli::types::{DataType, Season, Week};
use crate::error::{NflError, Result};
use crate::extract::{DataSource, ExtractionSummary, Extractor, NflverseSource};

use super::common::{print_extraction_summary, CommandContext};
use super::resolve_workers;

/// What to extract in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractRequest {
    Seasons(Vec<Season>),
    Season { season: Season, kinds: Vec<DataType> },
    Week { season: Season, week: Week },
}

#[derive(Debug)]
pub struct ExtractParams {
    pub request: ExtractRequest,
    pub workers: Option<usize>,
    pub refresh_cache: bool,
}

pub async fn handle_extract(ctx: CommandContext, params: ExtractParams) -> Result<()> {
    let source = NflverseSource::new(&ctx.config, params.refresh_cache)?;
    let workers = resolve_workers(params.workers, &ctx.config)?;
    let summary = run_extract(ctx, source, params.request, workers).await?;
    print_extraction_summary(&summary);
    check_summary(&summary)
}

/// Run a request against any source, returning the per-job summary.
pub async fn run_extract<S: DataSource>(
    ctx: CommandContext,
    source: S,
    request: ExtractRequest,
    workers: usize,
) -> Result<ExtractionSummary> {
    let mut extractor = Extractor::new(ctx.db, source);

    let summary = match request {
        ExtractRequest::Seasons(seasons) => extractor.extract_all(&seasons, workers).await,
        ExtractRequest::Season { season, kinds } => {
            let kinds = if kinds.is_empty() {
                DataType::DEFAULT_REFRESH.to_vec()
            } else {
                kinds
            };
            extractor.refresh_season(season, &kinds, workers).await
        }
        ExtractRequest::Week { season, week } => extractor.refresh_week(season, week).await,
    };

    extractor.into_database().close()?;
    Ok(summary)
}

/// Any failed job turns the run into an error.
pub fn check_summary(summary: &ExtractionSummary) -> Result<()> {
    if summary.has_failures() {
        return Err(NflError::ExtractionFailed {
            failed: summary.failed().count(),
            total: summary.outcomes.len(),
        });
    }
    Ok(())
}
