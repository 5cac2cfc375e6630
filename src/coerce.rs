//! Value Coercer: raw upstream text to typed values.
//!
//! Coercion never fails. A value is either typed, recognised as missing, or
//! skipped; skipped values are stored as NULL and counted per column.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rayon::prelude::*;
use serde::Serialize;

use crate::schema::SqlType;
use crate::value::Value;

/// Spellings the upstream CSVs use for "no value".
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "None", "none", "null", "NULL", "NaT", "<NA>"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Outcome of coercing one raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Value(Value),
    Null,
    /// The value could not be typed as `target`; it will be loaded as NULL.
    Skipped { raw: String, target: SqlType },
}

impl Coerced {
    /// Value to store. Skipped values degrade to NULL, never to their text.
    pub fn into_value(self) -> Value {
        match self {
            Coerced::Value(v) => v,
            Coerced::Null | Coerced::Skipped { .. } => Value::Null,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Coerced::Skipped { .. })
    }
}

pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_MARKERS.contains(&trimmed)
}

/// Coerce one raw value to `target`.
pub fn coerce(raw: &str, target: SqlType) -> Coerced {
    if is_missing(raw) {
        return Coerced::Null;
    }
    let value = raw.trim();

    let typed = match target {
        SqlType::Text => return Coerced::Value(Value::Text(raw.to_string())),
        SqlType::Integer => match parse_number(value) {
            Number::NonFinite => return Coerced::Null,
            Number::Finite(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Some(Value::Integer(n as i64)),
            Number::Integer(i) => Some(Value::Integer(i)),
            _ => None,
        },
        SqlType::Real => match parse_number(value) {
            Number::NonFinite => return Coerced::Null,
            Number::Finite(n) => Some(Value::Real(n)),
            Number::Integer(i) => Some(Value::Real(i as f64)),
            Number::Invalid => None,
        },
        SqlType::Boolean => parse_bool(value).map(Value::Boolean),
        SqlType::Date => parse_date(value).map(Value::Date),
        SqlType::Time => parse_time(value).map(Value::Time),
        SqlType::Timestamp => parse_timestamp(value).map(Value::Timestamp),
    };

    match typed {
        Some(v) => Coerced::Value(v),
        None => Coerced::Skipped {
            raw: raw.to_string(),
            target,
        },
    }
}

enum Number {
    Integer(i64),
    Finite(f64),
    NonFinite,
    Invalid,
}

fn parse_number(value: &str) -> Number {
    if let Ok(i) = value.parse::<i64>() {
        return Number::Integer(i);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Number::Finite(n),
        Ok(_) => Number::NonFinite,
        Err(_) => Number::Invalid,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| parse_timestamp(value).map(|ts| ts.date()))
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl Value {
    /// Re-coerce an already typed value, used when an existing table
    /// declares a different type than the incoming data.
    pub fn recast(self, target: SqlType) -> Coerced {
        let already_typed = matches!(
            (&self, target),
            (Value::Integer(_), SqlType::Integer)
                | (Value::Real(_), SqlType::Real)
                | (Value::Boolean(_), SqlType::Boolean)
                | (Value::Date(_), SqlType::Date)
                | (Value::Time(_), SqlType::Time)
                | (Value::Timestamp(_), SqlType::Timestamp)
                | (Value::Text(_), SqlType::Text)
        );
        if already_typed {
            return Coerced::Value(self);
        }
        match self {
            Value::Null => Coerced::Null,
            Value::Boolean(b) if target == SqlType::Integer => Coerced::Value(Value::Integer(i64::from(b))),
            Value::Boolean(b) if target == SqlType::Real => Coerced::Value(Value::Real(if b { 1.0 } else { 0.0 })),
            other => coerce(&other.to_string(), target),
        }
    }
}

/// Skipped-value counts per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoercionReport {
    pub skipped: BTreeMap<String, usize>,
}

impl CoercionReport {
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn record(&mut self, column: &str, count: usize) {
        if count > 0 {
            *self.skipped.entry(column.to_string()).or_default() += count;
        }
    }

    pub fn merge(&mut self, other: CoercionReport) {
        for (column, count) in other.skipped {
            self.record(&column, count);
        }
    }
}

/// Coerce every row against the column types, in parallel.
///
/// Rows shorter than the header list are padded with NULL.
pub fn coerce_rows(columns: &[(String, SqlType)], rows: &[Vec<String>]) -> (Vec<Vec<Value>>, CoercionReport) {
    let coerced: Vec<(Vec<Value>, Vec<usize>)> = rows
        .par_iter()
        .map(|row| {
            let mut skipped_at = Vec::new();
            let values = columns
                .iter()
                .enumerate()
                .map(|(i, (_, sql_type))| {
                    let raw = row.get(i).map(String::as_str).unwrap_or("");
                    let result = coerce(raw, *sql_type);
                    if result.is_skipped() {
                        skipped_at.push(i);
                    }
                    result.into_value()
                })
                .collect();
            (values, skipped_at)
        })
        .collect();

    let mut counts = vec![0usize; columns.len()];
    let mut typed = Vec::with_capacity(coerced.len());
    for (values, skipped_at) in coerced {
        for i in skipped_at {
            counts[i] += 1;
        }
        typed.push(values);
    }

    let mut report = CoercionReport::default();
    for ((name, _), count) in columns.iter().zip(counts) {
        report.record(name, count);
    }

    (typed, report)
}

#[cfg(test)]
mod tests;
