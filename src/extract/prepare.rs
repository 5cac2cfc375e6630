//! Turning raw upstream tables into typed, loadable tables
//!
//! Headers are normalized (aliases, reserved renames), a schema is generated
//! from the data, every cell is coerced to its column type, and the weekly
//! and seasonal tables get their fantasy point columns. Seasonal stats are
//! rolled up from weekly lines.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::source::RawTable;
use crate::cli::types::{DataType, Week};
use crate::coerce::coerce_rows;
use crate::error::Result;
use crate::fantasy::add_fantasy_columns;
use crate::schema::catalog::{
    column_aliases, natural_key, AVERAGED_STAT_COLUMNS, SEASONAL_IDENTITY_COLUMNS, SUMMED_STAT_COLUMNS,
};
use crate::schema::{generate_schema, normalize_headers, typed_table_schema, SqlType, TableHints};
use crate::storage::TableData;
use crate::value::Value;

/// Season type assumed when weekly lines don't carry one.
const DEFAULT_SEASON_TYPE: &str = "REG";

pub fn prepare_table(data_type: DataType, raw: RawTable) -> Result<TableData> {
    if data_type == DataType::SeasonalStats {
        let weekly = type_table(DataType::WeeklyStats, raw)?;
        let mut seasonal = aggregate_seasonal(&weekly);
        add_fantasy_columns(&mut seasonal.schema.columns, &mut seasonal.rows);
        return Ok(seasonal);
    }

    let mut data = type_table(data_type, raw)?;
    if data_type.has_fantasy_points() {
        add_fantasy_columns(&mut data.schema.columns, &mut data.rows);
    }
    Ok(data)
}

/// Weekly stats restricted to one week.
pub fn prepare_week(mut raw: RawTable, week: Week) -> Result<TableData> {
    raw.retain_number("week", week.as_i64());
    prepare_table(DataType::WeeklyStats, raw)
}

fn type_table(data_type: DataType, raw: RawTable) -> Result<TableData> {
    let table = data_type.table_name();
    let headers = normalize_headers(table, column_aliases(data_type), &raw.headers)?;
    let schema = generate_schema(data_type, &headers, &raw.rows);

    let columns: Vec<(String, SqlType)> = schema
        .columns
        .iter()
        .map(|c| (c.name.clone(), c.sql_type))
        .collect();
    let (rows, coercion) = coerce_rows(&columns, &raw.rows);

    if coercion.total_skipped() > 0 {
        warn!(
            table,
            skipped = coercion.total_skipped(),
            columns = ?coercion.skipped.keys().collect::<Vec<_>>(),
            "Values did not match their column type and were loaded as NULL"
        );
    }
    debug!(table, rows = rows.len(), columns = columns.len(), "Prepared table");

    Ok(TableData {
        schema,
        rows,
        coercion,
    })
}

#[derive(Default)]
struct SeasonTotals {
    games: i64,
    latest_week: i64,
    identity: Vec<Value>,
    sums: Vec<Option<f64>>,
    averages: Vec<(f64, usize)>,
}

/// Roll weekly lines up to one row per player, season and season type.
///
/// Counting stats are summed, rate stats averaged over the games that have
/// them, and identity columns come from the player's latest week.
pub fn aggregate_seasonal(weekly: &TableData) -> TableData {
    let schema = &weekly.schema;
    let position = |name: &str| schema.column_index(name);

    let identity: Vec<(&str, usize)> = SEASONAL_IDENTITY_COLUMNS
        .iter()
        .filter_map(|c| position(c).map(|i| (*c, i)))
        .collect();
    let summed: Vec<(&str, usize)> = SUMMED_STAT_COLUMNS
        .iter()
        .filter_map(|c| position(c).map(|i| (*c, i)))
        .collect();
    let averaged: Vec<(&str, usize)> = AVERAGED_STAT_COLUMNS
        .iter()
        .filter_map(|c| position(c).map(|i| (*c, i)))
        .collect();

    let player_idx = position("player_id");
    let season_idx = position("season");
    let week_idx = position("week");
    let season_type_idx = position("season_type");

    let mut groups: BTreeMap<(String, i64, String), SeasonTotals> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in &weekly.rows {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or(&Value::Null);
        let (Some(player_id), Some(season)) = (cell(player_idx).as_str(), cell(season_idx).as_i64()) else {
            dropped += 1;
            continue;
        };
        let season_type = cell(season_type_idx)
            .as_str()
            .unwrap_or(DEFAULT_SEASON_TYPE)
            .to_string();
        let week = cell(week_idx).as_i64().unwrap_or(0);

        let totals = groups
            .entry((player_id.to_string(), season, season_type))
            .or_insert_with(|| SeasonTotals {
                sums: vec![None; summed.len()],
                averages: vec![(0.0, 0); averaged.len()],
                ..SeasonTotals::default()
            });

        totals.games += 1;
        if totals.identity.is_empty() || week >= totals.latest_week {
            totals.latest_week = week;
            totals.identity = identity.iter().map(|(_, i)| row[*i].clone()).collect();
        }
        for (slot, (_, i)) in totals.sums.iter_mut().zip(&summed) {
            if let Some(v) = row[*i].as_f64() {
                *slot = Some(slot.unwrap_or(0.0) + v);
            }
        }
        for (slot, (_, i)) in totals.averages.iter_mut().zip(&averaged) {
            if let Some(v) = row[*i].as_f64() {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, "Weekly lines without player_id or season left out of seasonal stats");
    }

    let mut columns: Vec<(String, SqlType)> = identity
        .iter()
        .map(|(name, i)| (name.to_string(), schema.columns[*i].sql_type))
        .collect();
    columns.push(("season".to_string(), SqlType::Integer));
    columns.push(("season_type".to_string(), SqlType::Text));
    columns.push(("games".to_string(), SqlType::Integer));
    let summed_types: Vec<SqlType> = summed
        .iter()
        .map(|(_, i)| match schema.columns[*i].sql_type {
            SqlType::Integer => SqlType::Integer,
            _ => SqlType::Real,
        })
        .collect();
    for ((name, _), sql_type) in summed.iter().zip(&summed_types) {
        columns.push((name.to_string(), *sql_type));
    }
    for (name, _) in &averaged {
        columns.push((name.to_string(), SqlType::Real));
    }

    let rows: Vec<Vec<Value>> = groups
        .into_iter()
        .map(|((_, season, season_type), totals)| {
            let mut row = totals.identity;
            row.push(Value::Integer(season));
            row.push(Value::Text(season_type));
            row.push(Value::Integer(totals.games));
            for (sum, sql_type) in totals.sums.into_iter().zip(&summed_types) {
                row.push(match (sum, sql_type) {
                    (None, _) => Value::Null,
                    (Some(v), SqlType::Integer) => Value::Integer(v.round() as i64),
                    (Some(v), _) => Value::Real(v),
                });
            }
            for (total, count) in totals.averages {
                row.push(if count == 0 {
                    Value::Null
                } else {
                    Value::Real(total / count as f64)
                });
            }
            row
        })
        .collect();

    let key = natural_key(DataType::SeasonalStats);
    let primary_key = if identity.iter().any(|(name, _)| *name == "player_id") {
        key.iter().map(|k| k.to_string()).collect()
    } else {
        Vec::new()
    };

    let schema = typed_table_schema(
        DataType::SeasonalStats.table_name(),
        &columns,
        primary_key,
        TableHints::for_data_type(DataType::SeasonalStats),
    );

    TableData {
        schema,
        rows,
        coercion: weekly.coercion.clone(),
    }
}
