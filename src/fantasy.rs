//! Fantasy point scoring for standard, half-PPR and full-PPR leagues.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::types::Season;
use crate::schema::{quote_ident, ColumnDef, SqlType};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum ScoringSystem {
    #[clap(name = "standard", alias = "std")]
    Standard,
    #[clap(name = "half-ppr", alias = "half")]
    HalfPpr,
    #[clap(name = "full-ppr", alias = "ppr")]
    FullPpr,
}

impl ScoringSystem {
    pub const ALL: [ScoringSystem; 3] = [
        ScoringSystem::Standard,
        ScoringSystem::HalfPpr,
        ScoringSystem::FullPpr,
    ];

    /// Points per reception.
    pub fn reception_bonus(&self) -> f64 {
        match self {
            ScoringSystem::Standard => 0.0,
            ScoringSystem::HalfPpr => 0.5,
            ScoringSystem::FullPpr => 1.0,
        }
    }

    /// Derived column holding this system's points.
    pub fn column_name(&self) -> &'static str {
        match self {
            ScoringSystem::Standard => "fantasy_points_std",
            ScoringSystem::HalfPpr => "fantasy_points_half_ppr",
            ScoringSystem::FullPpr => "fantasy_points_full_ppr",
        }
    }
}

impl fmt::Display for ScoringSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringSystem::Standard => write!(f, "standard"),
            ScoringSystem::HalfPpr => write!(f, "half-ppr"),
            ScoringSystem::FullPpr => write!(f, "full-ppr"),
        }
    }
}

/// Stats that score points. Missing stats are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatLine {
    pub passing_yards: f64,
    pub passing_tds: f64,
    pub interceptions: f64,
    pub rushing_yards: f64,
    pub rushing_tds: f64,
    pub receptions: f64,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
    pub fumbles_lost: f64,
}

const FUMBLE_LOST_COLUMNS: [&str; 3] = ["sack_fumbles_lost", "rushing_fumbles_lost", "receiving_fumbles_lost"];

impl StatLine {
    /// Read a stat line from a typed row.
    ///
    /// `interceptions` falls back to `passing_interceptions`, and
    /// `fumbles_lost` to the sum of the per-phase fumbles-lost columns.
    pub fn from_row(columns: &[&str], row: &[Value]) -> Self {
        let lookup = |name: &str| -> Option<f64> {
            columns
                .iter()
                .position(|c| *c == name)
                .and_then(|i| row.get(i))
                .and_then(Value::as_f64)
        };
        let stat = |name: &str| lookup(name).unwrap_or(0.0);

        let interceptions = lookup("interceptions")
            .or_else(|| lookup("passing_interceptions"))
            .unwrap_or(0.0);
        let fumbles_lost = lookup("fumbles_lost")
            .unwrap_or_else(|| FUMBLE_LOST_COLUMNS.iter().map(|c| stat(*c)).sum());

        Self {
            passing_yards: stat("passing_yards"),
            passing_tds: stat("passing_tds"),
            interceptions,
            rushing_yards: stat("rushing_yards"),
            rushing_tds: stat("rushing_tds"),
            receptions: stat("receptions"),
            receiving_yards: stat("receiving_yards"),
            receiving_tds: stat("receiving_tds"),
            fumbles_lost,
        }
    }
}

/// Fantasy points for one stat line, rounded to two decimals.
pub fn score(stats: &StatLine, system: ScoringSystem) -> f64 {
    let passing = stats.passing_yards / 25.0 + 4.0 * stats.passing_tds - 2.0 * stats.interceptions;
    let rushing = stats.rushing_yards / 10.0 + 6.0 * stats.rushing_tds;
    let receiving = stats.receiving_yards / 10.0
        + 6.0 * stats.receiving_tds
        + system.reception_bonus() * stats.receptions;
    let fumbles = -2.0 * stats.fumbles_lost;

    round2(passing + rushing + receiving + fumbles)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Column definitions appended to stat tables.
pub fn fantasy_columns() -> Vec<ColumnDef> {
    ScoringSystem::ALL
        .iter()
        .map(|system| ColumnDef {
            name: system.column_name().to_string(),
            sql_type: SqlType::Real,
            nullable: true,
        })
        .collect()
}

/// Compute the three scoring columns for every row. Existing columns with
/// the same names are overwritten; missing ones are appended.
pub fn add_fantasy_columns(columns: &mut Vec<ColumnDef>, rows: &mut [Vec<Value>]) {
    let positions: Vec<usize> = fantasy_columns()
        .into_iter()
        .map(|def| match columns.iter().position(|c| c.name == def.name) {
            Some(i) => i,
            None => {
                columns.push(def);
                columns.len() - 1
            }
        })
        .collect();

    let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();

    for row in rows.iter_mut() {
        row.resize(names.len(), Value::Null);
        let stats = StatLine::from_row(&names, row);
        for (system, &i) in ScoringSystem::ALL.iter().zip(&positions) {
            row[i] = Value::Real(score(&stats, *system));
        }
    }
}

/// Query ranking one season of a stats table by a scoring column, with its
/// bound parameters.
pub fn top_performers_sql(
    table: &str,
    system: ScoringSystem,
    season: Season,
    position: Option<&str>,
    limit: usize,
) -> (String, Vec<Value>) {
    let column = quote_ident(system.column_name());
    let mut sql = format!(
        "SELECT player_name, position, recent_team, season, {column} FROM {} WHERE season = ?1",
        quote_ident(table),
    );
    let mut params = vec![Value::Integer(season.as_i64())];
    if let Some(position) = position {
        sql.push_str(" AND position = ?2");
        params.push(Value::Text(position.to_uppercase()));
    }
    sql.push_str(&format!(" ORDER BY {column} DESC LIMIT {limit}"));
    (sql, params)
}
