//! Upstream data sources

use std::future::Future;

use serde::Serialize;

use crate::cli::types::{DataType, Season};
use crate::error::{error_kind, NflError};

/// An untyped table as delivered by a source: header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse a CSV document with a header row. Short records are allowed.
    pub fn parse_csv(bytes: &[u8]) -> csv::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<csv::Result<Vec<Vec<String>>>>()?;

        Ok(Self { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Keep rows whose `column` parses to `value`. Without that column
    /// every row is kept.
    pub fn retain_number(&mut self, column: &str, value: i64) {
        let Some(idx) = self.column_index(column) else {
            return;
        };
        self.rows.retain(|row| {
            row.get(idx)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .is_some_and(|v| v == value as f64)
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Why a fetch failed: the underlying error's type name and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceError {
    pub kind: String,
    pub message: String,
}

impl SourceError {
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        Self {
            kind: error_kind(err),
            message: err.to_string(),
        }
    }

    pub fn into_nfl_error(self, table: &str) -> NflError {
        NflError::SourceUnavailable {
            table: table.to_string(),
            kind: self.kind,
            message: self.message,
        }
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Provider of raw entity tables.
///
/// `season` is `None` for the reference entities (teams, players). For
/// `SeasonalStats` a source returns weekly-grain rows; the season rollup
/// happens during preparation.
pub trait DataSource: Send + Sync + 'static {
    fn fetch(
        &self,
        data_type: DataType,
        season: Option<Season>,
    ) -> impl Future<Output = Result<RawTable, SourceError>> + Send;
}
