//! Error types for the NFL analytics ETL

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NflError>;

#[derive(Error, Debug)]
pub enum NflError {
    /// An upstream fetch failed. `kind` names the underlying error type.
    #[error("Source unavailable for {table}: {kind}: {message}")]
    SourceUnavailable {
        table: String,
        kind: String,
        message: String,
    },

    #[error("Schema conflict in {table}: {message}")]
    SchemaConflict { table: String, message: String },

    /// A refresh transaction was rolled back; prior data is untouched.
    #[error("Refresh of {table} ({scope}) failed and was rolled back: {cause}")]
    RefreshFailed {
        table: String,
        scope: String,
        cause: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Query failed: {message}")]
    Query { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid season: {value}")]
    InvalidSeason { value: String },

    #[error("Invalid week: {value}")]
    InvalidWeek { value: String },

    #[error("Unknown data type: {value}")]
    UnknownDataType { value: String },

    #[error("Table {table} does not exist")]
    MissingTable { table: String },

    #[error("No ranking files found in {dir}")]
    NoRankingFiles { dir: String },

    /// A spawned extraction or preparation task panicked or was cancelled.
    #[error("Extraction task for {table} did not complete: {message}")]
    TaskFailed { table: String, message: String },

    /// Some jobs of an extraction or refresh run failed; the rest were loaded.
    #[error("{failed} of {total} extraction jobs failed")]
    ExtractionFailed { failed: usize, total: usize },
}

impl NflError {
    /// Build a `SourceUnavailable` from any error, keeping its type name and text.
    pub fn source_unavailable<E>(table: &str, err: &E) -> Self
    where
        E: std::error::Error,
    {
        NflError::SourceUnavailable {
            table: table.to_string(),
            kind: error_kind(err),
            message: err.to_string(),
        }
    }
}

/// Fully qualified type name of an error value, e.g. `std::io::error::Error`.
pub fn error_kind<E: ?Sized>(_: &E) -> String {
    std::any::type_name::<E>().to_string()
}

#[cfg(test)]
mod tests;
