//! Query export to CSV, TSV, Parquet or JSON, chosen by file extension

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, RecordBatch, StringArray,
    TimestampMicrosecondArray,
};
use arrow_schema::{DataType as ArrowType, Field, Schema, TimeUnit};
use chrono::Datelike;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use tracing::info;

use super::{models::QueryResult, schema::Database};
use crate::error::Result;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Parquet,
    Json,
}

impl ExportFormat {
    /// `.csv`, `.tsv` and `.parquet` by extension; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => ExportFormat::Csv,
            Some("tsv") => ExportFormat::Tsv,
            Some("parquet") => ExportFormat::Parquet,
            _ => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub rows: usize,
}

impl Database {
    /// Run `sql` and write its result to `path`.
    pub fn export_query(&self, sql: &str, path: &Path) -> Result<ExportSummary> {
        let result = self.query(sql)?;
        let format = ExportFormat::from_path(path);
        write_result(&result, path, format)?;
        info!(path = %path.display(), rows = result.rows.len(), ?format, "Exported query result");
        Ok(ExportSummary {
            path: path.to_path_buf(),
            format,
            rows: result.rows.len(),
        })
    }
}

pub fn write_result(result: &QueryResult, path: &Path, format: ExportFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    match format {
        ExportFormat::Csv => write_delimited(result, path, b','),
        ExportFormat::Tsv => write_delimited(result, path, b'\t'),
        ExportFormat::Parquet => write_parquet(result, path),
        ExportFormat::Json => write_json(result, path),
    }
}

fn write_delimited(result: &QueryResult, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    writer.write_record(&result.columns)?;
    for row in &result.rows {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(result: &QueryResult, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &result.to_records())?;
    Ok(())
}

fn write_parquet(result: &QueryResult, path: &Path) -> Result<()> {
    let mut fields = Vec::with_capacity(result.columns.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(result.columns.len());

    for (i, name) in result.columns.iter().enumerate() {
        let cells: Vec<&Value> = result.rows.iter().map(|row| &row[i]).collect();
        let data_type = arrow_type_for(&cells);
        arrays.push(build_array(&cells, &data_type));
        fields.push(Field::new(name, data_type, true));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Narrowest Arrow type that holds every non-NULL cell of a column.
fn arrow_type_for(cells: &[&Value]) -> ArrowType {
    let mut all_int = true;
    let mut all_num = true;
    let mut all_bool = true;
    let mut all_date = true;
    let mut all_timestamp = true;
    let mut any = false;

    for cell in cells.iter().filter(|c| !c.is_null()) {
        any = true;
        all_int &= matches!(cell, Value::Integer(_));
        all_num &= matches!(cell, Value::Integer(_) | Value::Real(_));
        all_bool &= matches!(cell, Value::Boolean(_));
        all_date &= matches!(cell, Value::Date(_));
        all_timestamp &= matches!(cell, Value::Timestamp(_));
    }

    if !any {
        ArrowType::Utf8
    } else if all_bool {
        ArrowType::Boolean
    } else if all_int {
        ArrowType::Int64
    } else if all_num {
        ArrowType::Float64
    } else if all_date {
        ArrowType::Date32
    } else if all_timestamp {
        ArrowType::Timestamp(TimeUnit::Microsecond, None)
    } else {
        ArrowType::Utf8
    }
}

fn build_array(cells: &[&Value], data_type: &ArrowType) -> ArrayRef {
    match data_type {
        ArrowType::Boolean => Arc::new(BooleanArray::from(
            cells
                .iter()
                .map(|c| match c {
                    Value::Boolean(b) => Some(*b),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        ArrowType::Int64 => Arc::new(Int64Array::from(cells.iter().map(|c| c.as_i64()).collect::<Vec<_>>())),
        ArrowType::Float64 => Arc::new(Float64Array::from(cells.iter().map(|c| c.as_f64()).collect::<Vec<_>>())),
        ArrowType::Date32 => Arc::new(Date32Array::from(
            cells
                .iter()
                .map(|c| match c {
                    Value::Date(d) => Some(d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        ArrowType::Timestamp(..) => Arc::new(TimestampMicrosecondArray::from(
            cells
                .iter()
                .map(|c| match c {
                    Value::Timestamp(ts) => Some(ts.and_utc().timestamp_micros()),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        _ => Arc::new(StringArray::from(
            cells
                .iter()
                .map(|c| if c.is_null() { None } else { Some(c.to_string()) })
                .collect::<Vec<_>>(),
        )),
    }
}
