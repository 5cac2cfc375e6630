use super::*;

#[test]
fn test_missing_markers_become_null() {
    for raw in ["", "  ", "NA", "NaN", "nan", "None", "null", "NaT"] {
        assert_eq!(coerce(raw, SqlType::Real), Coerced::Null, "raw = {raw:?}");
        assert_eq!(coerce(raw, SqlType::Text), Coerced::Null, "raw = {raw:?}");
    }
}

#[test]
fn test_non_finite_numbers_become_null() {
    assert_eq!(coerce("inf", SqlType::Real), Coerced::Null);
    assert_eq!(coerce("-inf", SqlType::Real), Coerced::Null);
    assert_eq!(coerce("inf", SqlType::Integer), Coerced::Null);
}

#[test]
fn test_integer_coercion() {
    assert_eq!(coerce("42", SqlType::Integer), Coerced::Value(Value::Integer(42)));
    assert_eq!(coerce("3.0", SqlType::Integer), Coerced::Value(Value::Integer(3)));
    assert_eq!(coerce(" -7 ", SqlType::Integer), Coerced::Value(Value::Integer(-7)));
    assert!(coerce("1.5", SqlType::Integer).is_skipped());
    assert!(coerce("KC", SqlType::Integer).is_skipped());
}

#[test]
fn test_real_coercion() {
    assert_eq!(coerce("0.25", SqlType::Real), Coerced::Value(Value::Real(0.25)));
    assert_eq!(coerce("12", SqlType::Real), Coerced::Value(Value::Real(12.0)));
    assert!(coerce("twelve", SqlType::Real).is_skipped());
}

#[test]
fn test_boolean_coercion() {
    for raw in ["true", "TRUE", "1", "yes", "y", "1.0"] {
        assert_eq!(coerce(raw, SqlType::Boolean), Coerced::Value(Value::Boolean(true)));
    }
    for raw in ["false", "0", "No", "n", "0.0"] {
        assert_eq!(coerce(raw, SqlType::Boolean), Coerced::Value(Value::Boolean(false)));
    }
    assert!(coerce("maybe", SqlType::Boolean).is_skipped());
}

#[test]
fn test_date_and_time_coercion() {
    let date = NaiveDate::from_ymd_opt(2023, 9, 7).unwrap();
    assert_eq!(coerce("2023-09-07", SqlType::Date), Coerced::Value(Value::Date(date)));
    assert_eq!(coerce("09/07/2023", SqlType::Date), Coerced::Value(Value::Date(date)));
    assert_eq!(
        coerce("2023-09-07T20:20:00Z", SqlType::Date),
        Coerced::Value(Value::Date(date))
    );

    let time = NaiveTime::from_hms_opt(20, 20, 0).unwrap();
    assert_eq!(coerce("20:20", SqlType::Time), Coerced::Value(Value::Time(time)));

    let ts = date.and_hms_opt(13, 5, 0).unwrap();
    assert_eq!(
        coerce("2023-09-07 13:05:00", SqlType::Timestamp),
        Coerced::Value(Value::Timestamp(ts))
    );
    assert_eq!(
        coerce("2023-09-07T13:05:00Z", SqlType::Timestamp),
        Coerced::Value(Value::Timestamp(ts))
    );
    assert!(coerce("Week 1", SqlType::Date).is_skipped());
}

#[test]
fn test_text_is_kept_verbatim() {
    assert_eq!(
        coerce("(14:56) P.Mahomes pass", SqlType::Text),
        Coerced::Value(Value::Text("(14:56) P.Mahomes pass".to_string()))
    );
}

#[test]
fn test_skipped_values_degrade_to_null() {
    let skipped = coerce("abc", SqlType::Integer);
    assert!(matches!(
        &skipped,
        Coerced::Skipped { raw, target: SqlType::Integer } if raw == "abc"
    ));
    assert_eq!(skipped.into_value(), Value::Null);
}

#[test]
fn test_recast() {
    assert_eq!(
        Value::Text("12".into()).recast(SqlType::Integer),
        Coerced::Value(Value::Integer(12))
    );
    assert_eq!(
        Value::Integer(3).recast(SqlType::Real),
        Coerced::Value(Value::Real(3.0))
    );
    assert_eq!(
        Value::Boolean(true).recast(SqlType::Integer),
        Coerced::Value(Value::Integer(1))
    );
    assert!(Value::Text("x".into()).recast(SqlType::Real).is_skipped());
    assert_eq!(Value::Null.recast(SqlType::Date), Coerced::Null);
}

#[test]
fn test_coerce_rows_counts_skipped_per_column() {
    let columns = vec![
        ("season".to_string(), SqlType::Integer),
        ("passing_yards".to_string(), SqlType::Real),
        ("player_name".to_string(), SqlType::Text),
    ];
    let rows = vec![
        vec!["2023".to_string(), "250.5".to_string(), "P.Mahomes".to_string()],
        vec!["2023".to_string(), "oops".to_string(), "J.Allen".to_string()],
        vec!["x".to_string(), "NA".to_string()],
    ];

    let (typed, report) = coerce_rows(&columns, &rows);

    assert_eq!(typed.len(), 3);
    assert_eq!(typed[0][1], Value::Real(250.5));
    assert_eq!(typed[1][1], Value::Null);
    assert_eq!(typed[2][0], Value::Null);
    assert_eq!(typed[2][2], Value::Null);
    assert_eq!(report.skipped.get("passing_yards"), Some(&1));
    assert_eq!(report.skipped.get("season"), Some(&1));
    assert_eq!(report.total_skipped(), 2);
}
