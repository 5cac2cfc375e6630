//! Typed cell values shared by the coercer, the loader and query results.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Serialize, Serializer};

use crate::schema::SqlType;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Fractional seconds are written only when present.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single typed value. Dates and times are stored in SQLite as ISO text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view used by aggregation and scoring. Booleans count as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Boolean(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Decode a SQLite cell using the column's declared type, so a `DATE`
    /// column comes back as `Value::Date` rather than text.
    pub fn from_sql_ref(value: ValueRef<'_>, declared: Option<SqlType>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => match declared {
                Some(SqlType::Boolean) => Value::Boolean(i != 0),
                Some(SqlType::Real) => Value::Real(i as f64),
                _ => Value::Integer(i),
            },
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(bytes) => {
                let text = String::from_utf8_lossy(bytes).into_owned();
                match declared {
                    Some(SqlType::Date) => NaiveDate::parse_from_str(&text, DATE_FORMAT)
                        .map(Value::Date)
                        .unwrap_or(Value::Text(text)),
                    Some(SqlType::Time) => NaiveTime::parse_from_str(&text, TIME_FORMAT)
                        .map(Value::Time)
                        .unwrap_or(Value::Text(text)),
                    Some(SqlType::Timestamp) => {
                        NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
                            .map(Value::Timestamp)
                            .unwrap_or(Value::Text(text))
                    }
                    _ => Value::Text(text),
                }
            }
            ValueRef::Blob(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

impl fmt::Display for Value {
    /// NULL renders as an empty string, which is what the CSV export wants.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Time(t) => write!(f, "{}", t.format(TIME_FORMAT)),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*r)),
            Value::Boolean(b) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(i64::from(*b))),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            other => ToSqlOutput::Owned(rusqlite::types::Value::Text(other.to_string())),
        })
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Text(s) => serializer.serialize_str(s),
            other => serializer.collect_str(other),
        }
    }
}
