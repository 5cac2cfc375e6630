//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fantasy::ScoringSystem;
use types::{DataType, Season, Week};

#[derive(Debug, Parser)]
#[clap(
    name = "nfl-analytics",
    version,
    about = "Extract nflverse data into a local SQLite database and query it"
)]
pub struct NflCli {
    /// SQLite database file (or set `NFL_DB_PATH`).
    #[clap(long, global = true)]
    pub database: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (or set `NFL_LOG_LEVEL`).
    #[clap(long, global = true)]
    pub log_level: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract teams, players and every season-scoped table for the given seasons.
    Extract {
        /// Seasons to extract, e.g. `2022 2023`.
        #[clap(required = true, num_args = 1..)]
        seasons: Vec<Season>,

        /// Concurrent downloads (or set `NFL_MAX_WORKERS`).
        #[clap(long, short)]
        workers: Option<usize>,

        /// Re-download files even when a cached copy exists.
        #[clap(long)]
        refresh_cache: bool,
    },

    /// Replace one season of selected tables.
    RefreshSeason {
        season: Season,

        /// Tables to refresh, e.g. `--data-types weekly,rosters`.
        /// Defaults to pbp, weekly, seasonal, rosters and injuries.
        #[clap(long, value_delimiter = ',', num_args = 1..)]
        data_types: Vec<DataType>,

        /// Concurrent downloads (or set `NFL_MAX_WORKERS`).
        #[clap(long, short)]
        workers: Option<usize>,

        /// Re-download files even when a cached copy exists.
        #[clap(long)]
        refresh_cache: bool,
    },

    /// Replace one week of weekly stats.
    RefreshWeek {
        season: Season,
        week: Week,

        /// Re-download files even when a cached copy exists.
        #[clap(long)]
        refresh_cache: bool,
    },

    /// Run SQL against the database, printing or exporting the result.
    Query {
        /// SQL text.
        #[clap(long, conflicts_with = "file", required_unless_present = "file")]
        sql: Option<String>,

        /// File containing the SQL to run.
        #[clap(long, short)]
        file: Option<PathBuf>,

        /// Write the result here instead of printing; format follows the
        /// extension (.csv, .tsv, .parquet, anything else JSON).
        #[clap(long, short)]
        output: Option<PathBuf>,

        /// Rows printed to the terminal.
        #[clap(long, default_value_t = 50)]
        limit: usize,
    },

    /// Data quality report for every table.
    Validate,

    /// Show table columns and declared types.
    Schema {
        /// Only this table.
        #[clap(long)]
        data_type: Option<DataType>,
    },

    /// Record counts, season coverage and recent refreshes.
    Stats,

    /// Load FantasyPros ranking exports into `raw_ecr_rankings`.
    RefreshRawEcr {
        /// Directory with `FantasyPros_*` files (or set `NFL_ECR_DIR`).
        #[clap(long)]
        dir: Option<PathBuf>,
    },

    /// Match raw rankings to players, building `ecr_rankings`.
    LinkEcr,

    /// Rebuild the `smry_season` summary table.
    Summarize,

    /// Top fantasy performers of a season.
    Top {
        #[clap(long, short)]
        season: Season,

        #[clap(long, value_enum, default_value_t = ScoringSystem::HalfPpr)]
        system: ScoringSystem,

        /// Filter by position, e.g. `-p WR`.
        #[clap(long, short)]
        position: Option<String>,

        #[clap(long, short, default_value_t = 20)]
        limit: usize,

        /// Weekly or seasonal stats.
        #[clap(long, default_value_t = DataType::SeasonalStats)]
        data_type: DataType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let cli = NflCli::try_parse_from(["nfl-analytics", "extract", "2022", "2023", "-w", "8"]).unwrap();
        match cli.command {
            Commands::Extract { seasons, workers, refresh_cache } => {
                assert_eq!(seasons, vec![Season::new(2022), Season::new(2023)]);
                assert_eq!(workers, Some(8));
                assert!(!refresh_cache);
            }
            other => panic!("Expected Extract, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_refresh_season_data_types() {
        let cli = NflCli::try_parse_from([
            "nfl-analytics",
            "--database",
            "x.db",
            "refresh-season",
            "2023",
            "--data-types",
            "weekly,rosters",
        ])
        .unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("x.db")));
        match cli.command {
            Commands::RefreshSeason { season, data_types, .. } => {
                assert_eq!(season, Season::new(2023));
                assert_eq!(data_types, vec![DataType::WeeklyStats, DataType::Rosters]);
            }
            other => panic!("Expected RefreshSeason, got {other:?}"),
        }
    }

    #[test]
    fn test_query_needs_sql_or_file() {
        assert!(NflCli::try_parse_from(["nfl-analytics", "query"]).is_err());
        assert!(NflCli::try_parse_from(["nfl-analytics", "query", "--sql", "SELECT 1", "--file", "a.sql"]).is_err());
        assert!(NflCli::try_parse_from(["nfl-analytics", "query", "--sql", "SELECT 1"]).is_ok());
    }

    #[test]
    fn test_invalid_season_rejected() {
        assert!(NflCli::try_parse_from(["nfl-analytics", "extract", "1950"]).is_err());
        assert!(NflCli::try_parse_from(["nfl-analytics", "refresh-week", "2023", "30"]).is_err());
    }

    #[test]
    fn test_top_defaults() {
        let cli = NflCli::try_parse_from(["nfl-analytics", "top", "-s", "2023"]).unwrap();
        match cli.command {
            Commands::Top { system, limit, data_type, position, .. } => {
                assert_eq!(system, ScoringSystem::HalfPpr);
                assert_eq!(limit, 20);
                assert_eq!(data_type, DataType::SeasonalStats);
                assert!(position.is_none());
            }
            other => panic!("Expected Top, got {other:?}"),
        }
    }
}
