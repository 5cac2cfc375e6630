//! nflverse release assets over HTTP, with an on-disk download cache.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use super::source::{DataSource, RawTable, SourceError};
use crate::cli::types::{DataType, Season};
use crate::config::Config;
use crate::error::Result;

/// Team descriptions, colors and logos.
pub const TEAMS_URL: &str = "https://github.com/nflverse/nflverse-pbp/raw/master/teams_colors_logos.csv";

/// Every scheduled game since 1999 in one file.
pub const SCHEDULES_URL: &str = "https://raw.githubusercontent.com/nflverse/nfldata/master/data/games.csv";

/// Pause before the second attempt; doubled for each further attempt.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Where each entity is downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Release-asset root, e.g. `.../nflverse-data/releases/download`
    pub release_base: String,
    pub teams: String,
    pub schedules: String,
}

impl Endpoints {
    pub fn new(release_base: &str) -> Self {
        Self {
            release_base: release_base.trim_end_matches('/').to_string(),
            teams: TEAMS_URL.to_string(),
            schedules: SCHEDULES_URL.to_string(),
        }
    }

    /// All entities under one root, laid out like the release tags.
    pub fn all_under(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            release_base: base.to_string(),
            teams: format!("{base}/teams/teams_colors_logos.csv"),
            schedules: format!("{base}/schedules/games.csv"),
        }
    }

    /// Asset URL for an entity. Seasonal stats share the weekly asset.
    pub fn url(&self, data_type: DataType, season: Option<Season>) -> String {
        let base = &self.release_base;
        let year = season.map(|s| s.to_string()).unwrap_or_default();
        match data_type {
            DataType::Teams => self.teams.clone(),
            DataType::Players => format!("{base}/players/players.csv"),
            DataType::Schedules => self.schedules.clone(),
            DataType::PlayByPlay => format!("{base}/pbp/play_by_play_{year}.csv"),
            DataType::WeeklyStats | DataType::SeasonalStats => {
                format!("{base}/player_stats/player_stats_{year}.csv")
            }
            DataType::Rosters => format!("{base}/weekly_rosters/roster_weekly_{year}.csv"),
            DataType::Injuries => format!("{base}/injuries/injuries_{year}.csv"),
        }
    }
}

pub struct NflverseSource {
    client: Client,
    endpoints: Endpoints,
    attempts: u32,
    cache_dir: Option<PathBuf>,
    refresh_cache: bool,
}

impl NflverseSource {
    pub fn new(config: &Config, refresh_cache: bool) -> Result<Self> {
        Self::with_endpoints(config, Endpoints::new(&config.data_base_url), refresh_cache)
    }

    pub fn with_endpoints(config: &Config, endpoints: Endpoints, refresh_cache: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoints,
            attempts: config.api_retries.max(1),
            cache_dir: config.cache_dir.clone(),
            refresh_cache,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn download(&self, url: &str) -> std::result::Result<Vec<u8>, SourceError> {
        let cached = self.cache_dir.as_deref().map(|dir| cache_path(dir, url));

        if !self.refresh_cache {
            if let Some(path) = &cached {
                if let Ok(bytes) = tokio::fs::read(path).await {
                    debug!(url, path = %path.display(), "Using cached download");
                    return Ok(bytes);
                }
            }
        }

        let bytes = self.get_with_retries(url).await?;

        if let Some(path) = &cached {
            if let Err(e) = write_cache(path, &bytes).await {
                warn!(path = %path.display(), error = %e, "Could not write download cache");
            }
        }

        Ok(bytes)
    }

    async fn get_with_retries(&self, url: &str) -> std::result::Result<Vec<u8>, SourceError> {
        let mut backoff = RETRY_BACKOFF;
        let mut attempt = 1;

        loop {
            match self.get_once(url).await {
                Ok(bytes) => {
                    info!(url, bytes = bytes.len(), "Downloaded");
                    return Ok(bytes);
                }
                Err(e) if attempt < self.attempts && is_retryable(&e) => {
                    warn!(url, attempt, error = %e, "Download failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(SourceError::from_error(&e)),
            }
        }
    }

    async fn get_once(&self, url: &str) -> reqwest::Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl DataSource for NflverseSource {
    async fn fetch(&self, data_type: DataType, season: Option<Season>) -> std::result::Result<RawTable, SourceError> {
        let url = self.endpoints.url(data_type, season);
        let bytes = self.download(&url).await?;

        let mut table = tokio::task::spawn_blocking(move || RawTable::parse_csv(&bytes))
            .await
            .map_err(|e| SourceError::from_error(&e))?
            .map_err(|e| SourceError::from_error(&e))?;

        // the schedules asset covers every season
        if let (DataType::Schedules, Some(season)) = (data_type, season) {
            table.retain_number("season", season.as_i64());
        }

        Ok(table)
    }
}

/// Client errors other than timeouts won't change on retry.
fn is_retryable(err: &reqwest::Error) -> bool {
    match err.status() {
        Some(status) => status.is_server_error() || status.as_u16() == 429,
        None => true,
    }
}

/// Cache file for a URL: scheme dropped, separators flattened.
fn cache_path(dir: &Path, url: &str) -> PathBuf {
    let stripped = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let name: String = stripped
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    dir.join(name)
}

async fn write_cache(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("part");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await
}

#[cfg(test)]
mod tests;
