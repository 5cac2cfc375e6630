//! Unit tests for storage functionality

use super::*;
use crate::cli::types::{DataType, Season, Week};
use crate::coerce::coerce_rows;
use crate::error::NflError;
use crate::schema::{generate_schema, SqlType};
use crate::value::Value;
use chrono::NaiveDate;

fn create_test_db() -> Database {
    Database::new_in_memory().unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Type raw rows the way the extractor does.
fn table(data_type: DataType, headers: &[&str], rows: &[&[&str]]) -> TableData {
    let headers = strings(headers);
    let rows: Vec<Vec<String>> = rows.iter().map(|r| strings(r)).collect();
    let schema = generate_schema(data_type, &headers, &rows);
    let columns: Vec<(String, SqlType)> = schema
        .columns
        .iter()
        .map(|c| (c.name.clone(), c.sql_type))
        .collect();
    let (typed, coercion) = coerce_rows(&columns, &rows);
    TableData {
        schema,
        rows: typed,
        coercion,
    }
}

fn schedule_rows(season: &str) -> TableData {
    let id1 = format!("{season}_01_DET_KC");
    let id2 = format!("{season}_01_ARI_WAS");
    table(
        DataType::Schedules,
        &["game_id", "season", "week", "gameday", "home_team", "away_team", "home_score"],
        &[
            &[&id1, season, "1", &format!("{season}-09-07"), "KC", "DET", "20"],
            &[&id2, season, "1", &format!("{season}-09-10"), "WAS", "ARI", "NA"],
        ],
    )
}

#[test]
fn test_database_creation() {
    let db = create_test_db();
    assert!(db.table_exists("data_refresh_log").unwrap());
    assert!(db.path().is_none());
}

#[test]
fn test_typed_round_trip() {
    let mut db = create_test_db();
    let data = schedule_rows("2023");
    db.refresh(&data, RefreshScope::Season(Season::new(2023))).unwrap();

    let result = db
        .query("SELECT season, week, gameday, home_score FROM schedules ORDER BY game_id DESC")
        .unwrap();

    assert_eq!(result.columns, vec!["season", "week", "gameday", "home_score"]);
    assert_eq!(result.rows[0][0], Value::Integer(2023));
    assert_eq!(
        result.rows[0][2],
        Value::Date(NaiveDate::from_ymd_opt(2023, 9, 7).unwrap())
    );
    assert_eq!(result.rows[0][3], Value::Integer(20));
    // "NA" read back as a real NULL
    assert_eq!(result.rows[1][3], Value::Null);
}

#[test]
fn test_fractional_timestamp_round_trip() {
    let mut db = create_test_db();
    let data = table(
        DataType::Injuries,
        &["season", "week", "player_id", "report_date", "date_modified"],
        &[&["2023", "1", "p1", "2023-09-06", "2023-09-06 20:37:46.500"]],
    );
    let written = data.rows[0][4].clone();
    assert!(matches!(written, Value::Timestamp(_)));
    db.refresh(&data, RefreshScope::Season(Season::new(2023))).unwrap();

    let read = db.query("SELECT date_modified FROM injuries").unwrap();
    assert_eq!(read.scalar(), Some(&written));
}

#[test]
fn test_skipped_values_load_as_null() {
    let mut db = create_test_db();
    let data = table(
        DataType::WeeklyStats,
        &["player_id", "season", "week", "season_type", "passing_yards"],
        &[&["p1", "2023", "1", "REG", "not-a-number"]],
    );
    assert_eq!(data.coercion.skipped.get("passing_yards"), Some(&1));

    db.refresh(&data, RefreshScope::Season(Season::new(2023))).unwrap();

    let nulls = db
        .query("SELECT COUNT(*) FROM weekly_stats WHERE passing_yards IS NULL")
        .unwrap();
    assert_eq!(nulls.scalar(), Some(&Value::Integer(1)));
    let as_text = db
        .query("SELECT COUNT(*) FROM weekly_stats WHERE passing_yards = 'not-a-number'")
        .unwrap();
    assert_eq!(as_text.scalar(), Some(&Value::Integer(0)));
}

#[test]
fn test_refresh_is_idempotent() {
    let mut db = create_test_db();
    let data = schedule_rows("2023");
    let scope = RefreshScope::Season(Season::new(2023));

    db.refresh(&data, scope).unwrap();
    let first = db.query("SELECT * FROM schedules ORDER BY game_id").unwrap();

    db.refresh(&data, scope).unwrap();
    let second = db.query("SELECT * FROM schedules ORDER BY game_id").unwrap();

    assert_eq!(first, second);
    assert_eq!(db.row_count("schedules").unwrap(), 2);
}

#[test]
fn test_season_refresh_leaves_other_seasons() {
    let mut db = create_test_db();
    db.refresh(&schedule_rows("2022"), RefreshScope::Season(Season::new(2022)))
        .unwrap();
    db.refresh(&schedule_rows("2023"), RefreshScope::Season(Season::new(2023)))
        .unwrap();
    db.refresh(&schedule_rows("2023"), RefreshScope::Season(Season::new(2023)))
        .unwrap();

    assert_eq!(db.row_count("schedules").unwrap(), 4);
}

#[test]
fn test_failed_refresh_keeps_prior_rows() {
    let mut db = create_test_db();
    let scope = RefreshScope::Season(Season::new(2023));
    db.refresh(&schedule_rows("2023"), scope).unwrap();

    // third of four rows is malformed, so the load fails after two inserts
    let mut broken = schedule_rows("2023");
    broken.rows.extend(schedule_rows("2023").rows);
    broken.rows[0][0] = Value::Text("2023_02_KC_JAX".into());
    broken.rows[1][0] = Value::Text("2023_02_LV_DEN".into());
    broken.rows[2].pop();

    let err = db.refresh(&broken, scope).unwrap_err();
    match &err {
        NflError::RefreshFailed { table, cause, .. } => {
            assert_eq!(table, "schedules");
            assert!(cause.contains("row 2"));
        }
        other => panic!("Expected RefreshFailed, got {other:?}"),
    }

    let ids = db.query("SELECT game_id FROM schedules ORDER BY game_id").unwrap();
    assert_eq!(
        ids.rows,
        vec![
            vec![Value::Text("2023_01_ARI_WAS".into())],
            vec![Value::Text("2023_01_DET_KC".into())],
        ]
    );

    let last = db.last_refresh("schedules", 2023, None).unwrap().unwrap();
    assert_eq!(last.status, RefreshStatus::Failed);
    assert!(last.error_message.unwrap().contains("row 2"));
}

#[test]
fn test_week_refresh_replaces_only_that_week() {
    let mut db = create_test_db();
    let headers = ["player_id", "season", "week", "season_type", "receptions"];
    let all = table(
        DataType::WeeklyStats,
        &headers,
        &[
            &["p1", "2023", "1", "REG", "3"],
            &["p1", "2023", "2", "REG", "4"],
        ],
    );
    db.refresh(&all, RefreshScope::Season(Season::new(2023))).unwrap();

    let week2 = table(DataType::WeeklyStats, &headers, &[&["p1", "2023", "2", "REG", "9"]]);
    db.refresh(&week2, RefreshScope::SeasonWeek(Season::new(2023), Week::new(2)))
        .unwrap();

    let result = db
        .query("SELECT week, receptions FROM weekly_stats ORDER BY week")
        .unwrap();
    assert_eq!(
        result.rows,
        vec![
            vec![Value::Integer(1), Value::Integer(3)],
            vec![Value::Integer(2), Value::Integer(9)],
        ]
    );
}

#[test]
fn test_reserved_keyword_columns() {
    let mut db = create_test_db();
    let headers = strings(&["game_id", "play_id", "desc"]);
    let headers = crate::schema::normalize_headers("pbp_data", &[], &headers).unwrap();
    assert_eq!(headers[2], "play_description");
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let data = table(
        DataType::PlayByPlay,
        &header_refs,
        &[&["2023_01_DET_KC", "1", "Kickoff"]],
    );
    db.refresh(&data, RefreshScope::All).unwrap();

    let ok = db.query("SELECT play_description FROM pbp_data").unwrap();
    assert_eq!(ok.scalar(), Some(&Value::Text("Kickoff".into())));

    for sql in [
        "SELECT [desc] FROM pbp_data",
        "SELECT \"desc\" FROM pbp_data",
        "SELECT desc FROM pbp_data",
    ] {
        let message = db.query(sql).unwrap_err().to_string();
        assert!(message.contains("no such column"), "{sql}: {message}");
        assert!(message.contains("play_description"), "{sql}: {message}");
    }

    // double quotes never turn an unknown name into a string literal
    let message = db
        .query("SELECT \"order\" FROM pbp_data")
        .unwrap_err()
        .to_string();
    assert!(message.contains("no such column"), "{message}");
}

#[test]
fn test_season_without_unique_key_drops_primary_key() {
    let mut db = create_test_db();
    let headers = ["season", "week", "player_id", "report_date", "report_status"];

    let first = table(
        DataType::Injuries,
        &headers,
        &[&["2022", "1", "p1", "2022-09-07", "Out"]],
    );
    assert!(!first.schema.primary_key.is_empty());
    db.refresh(&first, RefreshScope::Season(Season::new(2022))).unwrap();

    let second = table(
        DataType::Injuries,
        &headers,
        &[
            &["2023", "1", "p2", "NA", "Questionable"],
            &["2023", "1", "p3", "2023-09-07", "Out"],
        ],
    );
    assert!(second.schema.primary_key.is_empty());
    db.refresh(&second, RefreshScope::Season(Season::new(2023))).unwrap();

    assert_eq!(db.row_count("injuries").unwrap(), 3);
    assert!(db.table_info("injuries").unwrap().iter().all(|c| !c.primary_key && !c.not_null));
    let missing = db
        .query("SELECT player_id FROM injuries WHERE report_date IS NULL")
        .unwrap();
    assert_eq!(missing.rows, vec![vec![Value::Text("p2".into())]]);

    // the 2022 rows survived the rebuild, and reloading 2023 still works
    let kept = db.query("SELECT player_id FROM injuries WHERE season = 2022").unwrap();
    assert_eq!(kept.rows, vec![vec![Value::Text("p1".into())]]);
    db.refresh(&second, RefreshScope::Season(Season::new(2023))).unwrap();
    assert_eq!(db.row_count("injuries").unwrap(), 3);
}

#[test]
fn test_new_upstream_columns_are_added() {
    let mut db = create_test_db();
    db.refresh(&schedule_rows("2022"), RefreshScope::Season(Season::new(2022)))
        .unwrap();

    let wider = table(
        DataType::Schedules,
        &["game_id", "season", "week", "roof"],
        &[&["2023_01_DET_KC", "2023", "1", "outdoors"]],
    );
    db.refresh(&wider, RefreshScope::Season(Season::new(2023))).unwrap();

    let info = db.table_info("schedules").unwrap();
    assert!(info.iter().any(|c| c.name == "roof"));
    let roofs = db
        .query("SELECT COUNT(*) FROM schedules WHERE roof IS NULL")
        .unwrap();
    assert_eq!(roofs.scalar(), Some(&Value::Integer(2)));
}

#[test]
fn test_existing_column_type_wins() {
    let mut db = create_test_db();
    let first = table(
        DataType::Schedules,
        &["game_id", "season", "week", "attendance"],
        &[&["g1", "2022", "1", "70000"]],
    );
    db.refresh(&first, RefreshScope::Season(Season::new(2022))).unwrap();
    assert_eq!(
        db.table_info("schedules").unwrap()[3].sql_type(),
        Some(SqlType::Integer)
    );

    let second = table(
        DataType::Schedules,
        &["game_id", "season", "week", "attendance"],
        &[&["g2", "2023", "1", "sold out"]],
    );
    db.refresh(&second, RefreshScope::Season(Season::new(2023))).unwrap();

    assert_eq!(
        db.table_info("schedules").unwrap()[3].sql_type(),
        Some(SqlType::Integer)
    );
    let result = db
        .query("SELECT attendance FROM schedules WHERE season = 2023")
        .unwrap();
    assert_eq!(result.scalar(), Some(&Value::Null));
}

#[test]
fn test_create_or_replace_and_bulk_load() {
    let mut db = create_test_db();
    let data = table(
        DataType::Teams,
        &["team_abbr", "team_name", "team_conf"],
        &[&["KC", "Kansas City Chiefs", "AFC"], &["DET", "Detroit Lions", "NFC"]],
    );

    db.create_or_replace_table(&data.schema).unwrap();
    assert_eq!(db.bulk_load(&data).unwrap(), 2);
    assert_eq!(db.row_count("teams").unwrap(), 2);

    db.create_or_replace_table(&data.schema).unwrap();
    assert_eq!(db.row_count("teams").unwrap(), 0);
}

#[test]
fn test_refresh_log_entries() {
    let mut db = create_test_db();
    db.refresh(&schedule_rows("2023"), RefreshScope::Season(Season::new(2023)))
        .unwrap();

    let entry = db.last_refresh("schedules", 2023, None).unwrap().unwrap();
    assert_eq!(entry.status, RefreshStatus::Success);
    assert_eq!(entry.records_processed, 2);
    assert_eq!(entry.season_type, "ALL");
    assert!(!entry.refresh_date.is_empty());

    assert_eq!(db.recent_refreshes(5).unwrap().len(), 1);
    assert!(db.last_refresh("schedules", 2022, None).unwrap().is_none());
}

#[test]
fn test_database_stats() {
    let mut db = create_test_db();
    db.refresh(&schedule_rows("2022"), RefreshScope::Season(Season::new(2022)))
        .unwrap();
    db.refresh(&schedule_rows("2023"), RefreshScope::Season(Season::new(2023)))
        .unwrap();

    let stats = db.database_stats().unwrap();
    let schedules = stats.tables.iter().find(|t| t.name == "schedules").unwrap();
    assert_eq!(schedules.records, 4);
    assert_eq!(schedules.min_season, Some(2022));
    assert_eq!(schedules.max_season, Some(2023));
    assert_eq!(schedules.season_count, Some(2));
    assert_eq!(stats.recent_refreshes.len(), 2);
}

#[test]
fn test_validate_data_quality() {
    let mut db = create_test_db();
    db.refresh(&schedule_rows("2023"), RefreshScope::Season(Season::new(2023)))
        .unwrap();

    let report = db.validate_data_quality("schedules").unwrap();
    assert_eq!(report.total_rows, 2);
    assert_eq!(report.total_columns, 7);
    assert_eq!(report.duplicate_rows, Some(0));

    let home_score = report
        .null_checks
        .iter()
        .find(|c| c.column == "home_score")
        .unwrap();
    assert_eq!(home_score.null_count, 1);
    assert_eq!(home_score.null_percentage, 50.0);
    assert_eq!(report.high_null_columns().count(), 0);

    assert!(matches!(
        db.validate_data_quality("nope"),
        Err(NflError::MissingTable { .. })
    ));
}

#[test]
fn test_export_formats() {
    let mut db = create_test_db();
    db.refresh(&schedule_rows("2023"), RefreshScope::Season(Season::new(2023)))
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let sql = "SELECT game_id, season, gameday, home_score FROM schedules ORDER BY game_id";

    let csv_path = dir.path().join("out.csv");
    let summary = db.export_query(sql, &csv_path).unwrap();
    assert_eq!(summary.format, ExportFormat::Csv);
    assert_eq!(summary.rows, 2);
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("game_id,season,gameday,home_score"));
    assert!(csv.contains("2023_01_ARI_WAS,2023,2023-09-10,\n"));

    let json_path = dir.path().join("out.json");
    db.export_query(sql, &json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json[1]["home_score"], serde_json::json!(20));
    assert_eq!(json[0]["home_score"], serde_json::Value::Null);

    let parquet_path = dir.path().join("out.parquet");
    let summary = db.export_query(sql, &parquet_path).unwrap();
    assert_eq!(summary.format, ExportFormat::Parquet);
    let bytes = std::fs::read(&parquet_path).unwrap();
    assert_eq!(&bytes[..4], b"PAR1");
}

#[test]
fn test_parquet_export_keeps_temporal_types() {
    use arrow_array::{Array, Date32Array, TimestampMicrosecondArray};
    use arrow_schema::{DataType as ArrowType, TimeUnit};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    let mut db = create_test_db();
    let data = table(
        DataType::Injuries,
        &["season", "week", "player_id", "report_date", "date_modified"],
        &[
            &["2023", "1", "p1", "1970-01-02", "2023-09-06 20:37:46.500"],
            &["2023", "1", "p2", "NA", "NA"],
        ],
    );
    db.refresh(&data, RefreshScope::Season(Season::new(2023))).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("injuries.parquet");
    db.export_query(
        "SELECT player_id, report_date, date_modified FROM injuries ORDER BY player_id",
        &path,
    )
    .unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(std::fs::File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
    let batch = &batches[0];
    let schema = batch.schema();
    assert_eq!(schema.field(0).data_type(), &ArrowType::Utf8);
    assert_eq!(schema.field(1).data_type(), &ArrowType::Date32);
    assert_eq!(
        schema.field(2).data_type(),
        &ArrowType::Timestamp(TimeUnit::Microsecond, None)
    );

    let dates = batch.column(1).as_any().downcast_ref::<Date32Array>().unwrap();
    assert_eq!(dates.value(0), 1);
    assert!(dates.is_null(1));

    let stamps = batch
        .column(2)
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .unwrap();
    let expected = NaiveDate::from_ymd_opt(2023, 9, 6)
        .unwrap()
        .and_hms_milli_opt(20, 37, 46, 500)
        .unwrap();
    assert_eq!(stamps.value(0), expected.and_utc().timestamp_micros());
    assert!(stamps.is_null(1));
}

#[test]
fn test_export_format_from_extension() {
    use std::path::Path;
    assert_eq!(ExportFormat::from_path(Path::new("a.CSV")), ExportFormat::Csv);
    assert_eq!(ExportFormat::from_path(Path::new("a.tsv")), ExportFormat::Tsv);
    assert_eq!(ExportFormat::from_path(Path::new("a.parquet")), ExportFormat::Parquet);
    assert_eq!(ExportFormat::from_path(Path::new("a.json")), ExportFormat::Json);
    assert_eq!(ExportFormat::from_path(Path::new("a")), ExportFormat::Json);
}

#[test]
fn test_file_database_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("nfl.db");

    let mut db = Database::open(&path).unwrap();
    db.refresh(&schedule_rows("2023"), RefreshScope::Season(Season::new(2023)))
        .unwrap();
    db.close().unwrap();

    let db = Database::open(&path).unwrap();
    assert_eq!(db.row_count("schedules").unwrap(), 2);
}
