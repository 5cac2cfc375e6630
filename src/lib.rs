//! NFL Analytics ETL Library
//!
//! Downloads nflverse data sets, types them, and keeps them in a local
//! SQLite database that can be refreshed a season or a week at a time.
//!
//! ## Features
//!
//! - **Extraction**: Teams, players, schedules, play-by-play, weekly and seasonal
//!   stats, rosters and injuries, fetched concurrently with per-job failure isolation
//! - **Schema Generation**: Column types inferred from the data, with known columns
//!   pinned and reserved words renamed
//! - **Idempotent Refresh**: Season and week refreshes replace their rows in one
//!   transaction and are recorded in `data_refresh_log`
//! - **Fantasy Scoring**: Standard, half-PPR and full-PPR points on every stat line
//! - **Rankings**: FantasyPros consensus rankings loaded and linked to players
//! - **Query & Export**: Ad-hoc SQL printed or written as CSV, TSV, Parquet or JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nfl_analytics::{extract::{Extractor, NflverseSource}, Config, Database, Season};
//!
//! # async fn example() -> nfl_analytics::Result<()> {
//! let config = Config::from_env()?;
//! let db = Database::open(&config.database_path)?;
//! let source = NflverseSource::new(&config, false)?;
//!
//! let mut extractor = Extractor::new(db, source);
//! let summary = extractor.extract_all(&[Season::new(2023)], config.max_workers).await;
//! println!("{} records loaded", summary.total_records());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Every setting has an `NFL_*` variable, e.g.:
//! ```bash
//! export NFL_DB_PATH=data/nfl.db
//! export NFL_MAX_WORKERS=8
//! ```

pub mod cli;
pub mod coerce;
pub mod commands;
pub mod config;
pub mod ecr;
pub mod error;
pub mod extract;
pub mod fantasy;
pub mod logging;
pub mod schema;
pub mod storage;
pub mod summary;
pub mod value;

// Re-export commonly used types
pub use cli::types::{DataType, Season, Week};
pub use config::Config;
pub use error::{NflError, Result};
pub use storage::Database;
