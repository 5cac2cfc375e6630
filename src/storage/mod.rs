//! Storage layer: the SQLite database that holds every extracted table
//!
//! - `models`: Data structures
//! - `schema`: Connection management and the refresh log table
//! - `queries`: Table creation, bulk load, season-scoped refresh, queries
//! - `analysis`: Database statistics and data quality checks
//! - `export`: Writing query results to files

pub mod analysis;
pub mod export;
pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

pub use export::{ExportFormat, ExportSummary};
pub use models::*;
pub use schema::Database;
