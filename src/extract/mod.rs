//! Data Extractor: concurrent fetch, preparation and load of nflverse data
//!
//! - `source`: the `DataSource` trait and raw tables
//! - `nflverse`: HTTP source over nflverse release assets
//! - `prepare`: typing raw tables, fantasy columns, seasonal rollup
//!
//! Jobs run on tokio behind a semaphore sized by the worker count. Fetching
//! and preparation happen in the spawned tasks; every load goes through the
//! single database connection owned by the `Extractor`.

pub mod nflverse;
pub mod prepare;
pub mod source;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::cli::types::{DataType, Season, Week};
use crate::error::{NflError, Result};
use crate::storage::{Database, RefreshScope, RefreshStatus, TableData};

pub use nflverse::{Endpoints, NflverseSource};
pub use prepare::{aggregate_seasonal, prepare_table, prepare_week};
pub use source::{DataSource, RawTable, SourceError};

/// One entity to fetch and load, for one season or week when scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub data_type: DataType,
    pub season: Option<Season>,
    pub week: Option<Week>,
}

impl Job {
    pub fn reference(data_type: DataType) -> Self {
        Self {
            data_type,
            season: None,
            week: None,
        }
    }

    pub fn season(data_type: DataType, season: Season) -> Self {
        if !data_type.is_season_scoped() {
            return Self::reference(data_type);
        }
        Self {
            data_type,
            season: Some(season),
            week: None,
        }
    }

    pub fn week(season: Season, week: Week) -> Self {
        Self {
            data_type: DataType::WeeklyStats,
            season: Some(season),
            week: Some(week),
        }
    }

    /// Rows the job's load replaces.
    pub fn scope(&self) -> RefreshScope {
        match (self.season, self.week) {
            (Some(season), Some(week)) => RefreshScope::SeasonWeek(season, week),
            (Some(season), None) => RefreshScope::Season(season),
            _ => RefreshScope::All,
        }
    }

    fn prepare(self, raw: RawTable) -> Result<TableData> {
        match self.week {
            Some(week) => prepare_week(raw, week),
            None => prepare_table(self.data_type, raw),
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.data_type, self.scope())
    }
}

#[derive(Debug)]
pub struct JobOutcome {
    pub job: Job,
    pub records: usize,
    pub error: Option<NflError>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-job results of one extraction or refresh run.
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    pub outcomes: Vec<JobOutcome>,
}

impl ExtractionSummary {
    pub fn succeeded(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn total_records(&self) -> usize {
        self.outcomes.iter().map(|o| o.records).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn outcome(&self, data_type: DataType, season: Option<Season>) -> Option<&JobOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.job.data_type == data_type && o.job.season == season)
    }
}

pub struct Extractor<S: DataSource> {
    db: Database,
    source: Arc<S>,
}

impl<S: DataSource> Extractor<S> {
    pub fn new(db: Database, source: S) -> Self {
        Self {
            db,
            source: Arc::new(source),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn into_database(self) -> Database {
        self.db
    }

    /// Teams and players, then every season-scoped entity for each season.
    pub async fn extract_all(&mut self, seasons: &[Season], workers: usize) -> ExtractionSummary {
        let mut jobs: Vec<Job> = DataType::REFERENCE.iter().map(|dt| Job::reference(*dt)).collect();
        for season in seasons {
            jobs.extend(DataType::SEASONAL.iter().map(|dt| Job::season(*dt, *season)));
        }
        info!(seasons = seasons.len(), jobs = jobs.len(), workers, "Starting extraction");
        self.run_jobs(jobs, workers).await
    }

    pub async fn refresh_season(&mut self, season: Season, kinds: &[DataType], workers: usize) -> ExtractionSummary {
        let jobs = kinds.iter().map(|dt| Job::season(*dt, season)).collect();
        info!(%season, kinds = kinds.len(), "Refreshing season");
        self.run_jobs(jobs, workers).await
    }

    /// Replace one week of weekly stats.
    pub async fn refresh_week(&mut self, season: Season, week: Week) -> ExtractionSummary {
        info!(%season, %week, "Refreshing week");
        self.run_jobs(vec![Job::week(season, week)], 1).await
    }

    /// Fetch and prepare every job concurrently, loading each result as it
    /// arrives. A failing job is recorded and never stops the others.
    pub async fn run_jobs(&mut self, jobs: Vec<Job>, workers: usize) -> ExtractionSummary {
        let permits = Arc::new(Semaphore::new(workers.max(1)));
        let mut tasks = JoinSet::new();
        let mut pending = HashMap::with_capacity(jobs.len());

        for job in jobs {
            let source = Arc::clone(&self.source);
            let permits = Arc::clone(&permits);
            let handle = tasks.spawn(async move { fetch_and_prepare(source.as_ref(), &permits, job).await });
            pending.insert(handle.id(), job);
        }

        let mut summary = ExtractionSummary::default();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, prepared) = match joined {
                Ok((id, prepared)) => (id, prepared),
                Err(e) => {
                    let id = e.id();
                    let table = pending.get(&id).map(|job| job.data_type.table_name()).unwrap_or_default();
                    let failure = NflError::TaskFailed {
                        table: table.to_string(),
                        message: e.to_string(),
                    };
                    (id, Err(failure))
                }
            };
            let Some(job) = pending.remove(&id) else {
                error!(task = %id, "Finished task has no matching job");
                continue;
            };
            summary.outcomes.push(self.load(job, prepared));
        }

        info!(
            succeeded = summary.succeeded().count(),
            failed = summary.failed().count(),
            records = summary.total_records(),
            "Extraction finished"
        );
        summary
    }

    fn load(&mut self, job: Job, prepared: Result<TableData>) -> JobOutcome {
        let table = job.data_type.table_name();
        let scope = job.scope();

        let data = match prepared {
            Ok(data) => data,
            Err(e) => {
                error!(%job, error = %e, "Extraction failed");
                let message = e.to_string();
                if let Err(log_err) = self.db.log_refresh(table, scope, RefreshStatus::Failed, Some(&message), 0) {
                    warn!(table, error = %log_err, "Could not record failed extraction");
                }
                return JobOutcome {
                    job,
                    records: 0,
                    error: Some(e),
                };
            }
        };

        match self.db.refresh(&data, scope) {
            Ok(records) => JobOutcome {
                job,
                records,
                error: None,
            },
            Err(e) => {
                error!(%job, error = %e, "Load failed");
                JobOutcome {
                    job,
                    records: 0,
                    error: Some(e),
                }
            }
        }
    }
}

async fn fetch_and_prepare<S: DataSource>(source: &S, permits: &Semaphore, job: Job) -> Result<TableData> {
    let table = job.data_type.table_name();
    let raw = {
        let _permit = permits
            .acquire()
            .await
            .map_err(|e| NflError::source_unavailable(table, &e))?;
        source
            .fetch(job.data_type, job.season)
            .await
            .map_err(|e| e.into_nfl_error(table))?
    };
    info!(%job, rows = raw.len(), "Fetched");

    tokio::task::spawn_blocking(move || job.prepare(raw))
        .await
        .map_err(|e| NflError::TaskFailed {
            table: table.to_string(),
            message: e.to_string(),
        })?
}
