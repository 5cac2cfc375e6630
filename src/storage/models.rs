//! Data models for the storage layer

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::types::{Season, Week};
use crate::coerce::CoercionReport;
use crate::schema::{SqlType, TableSchema};
use crate::value::Value;

/// A typed table ready to be loaded: schema plus rows in schema column order.
#[derive(Debug, Clone)]
pub struct TableData {
    pub schema: TableSchema,
    pub rows: Vec<Vec<Value>>,
    pub coercion: CoercionReport,
}

impl TableData {
    pub fn new(schema: TableSchema, rows: Vec<Vec<Value>>) -> Self {
        Self {
            schema,
            rows,
            coercion: CoercionReport::default(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.schema.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Which rows a refresh replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
    /// Drop and recreate the whole table
    All,
    Season(Season),
    SeasonWeek(Season, Week),
}

impl RefreshScope {
    pub fn season(&self) -> Option<Season> {
        match self {
            RefreshScope::All => None,
            RefreshScope::Season(season) | RefreshScope::SeasonWeek(season, _) => Some(*season),
        }
    }

    pub fn week(&self) -> Option<Week> {
        match self {
            RefreshScope::SeasonWeek(_, week) => Some(*week),
            _ => None,
        }
    }
}

impl fmt::Display for RefreshScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshScope::All => write!(f, "all rows"),
            RefreshScope::Season(season) => write!(f, "season {season}"),
            RefreshScope::SeasonWeek(season, week) => write!(f, "season {season} week {week}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshStatus {
    Success,
    Failed,
}

impl RefreshStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshStatus::Success => "SUCCESS",
            RefreshStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUCCESS" => Some(RefreshStatus::Success),
            "FAILED" => Some(RefreshStatus::Failed),
            _ => None,
        }
    }
}

/// One row of `data_refresh_log`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshLogEntry {
    pub id: i64,
    pub table_name: String,
    /// 0 for reference tables
    pub season: i64,
    pub week: Option<i64>,
    pub season_type: String,
    pub refresh_date: String,
    pub status: RefreshStatus,
    pub error_message: Option<String>,
    pub records_processed: i64,
}

/// Column metadata from `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnInfo {
    pub fn sql_type(&self) -> Option<SqlType> {
        SqlType::from_declared(&self.declared_type)
    }
}

/// Column names plus typed rows of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(name, value)| {
                        let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                        (name.clone(), json)
                    })
                    .collect()
            })
            .collect()
    }

    /// First cell of the first row, for scalar queries.
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }
}

/// Row counts and season coverage of one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    pub name: String,
    pub records: i64,
    pub min_season: Option<i64>,
    pub max_season: Option<i64>,
    pub season_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStats {
    pub tables: Vec<TableStats>,
    pub recent_refreshes: Vec<RefreshLogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NullCheck {
    pub column: String,
    pub null_count: i64,
    pub null_percentage: f64,
}

/// Data quality summary of one table.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub table: String,
    pub total_rows: i64,
    pub total_columns: usize,
    pub null_checks: Vec<NullCheck>,
    /// Only computed for the reference-style tables
    pub duplicate_rows: Option<i64>,
}

impl QualityReport {
    /// Numeric columns that are more than half NULL.
    pub fn high_null_columns(&self) -> impl Iterator<Item = &NullCheck> {
        self.null_checks.iter().filter(|c| c.null_percentage > 50.0)
    }
}
