//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod nfl_error_tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err = NflError::from(io_error);

        match err {
            NflError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = NflError::from(json_error);

        match err {
            NflError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_database_error_conversion() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let db_error = conn.execute("SELEC 1", []).unwrap_err();
        let err = NflError::from(db_error);

        match err {
            NflError::Database(_) => (),
            _ => panic!("Expected Database error variant"),
        }
    }

    #[test]
    fn test_source_unavailable_keeps_kind_and_text() {
        let io_error = io::Error::new(io::ErrorKind::TimedOut, "upstream timed out");
        let err = NflError::source_unavailable("weekly_stats", &io_error);

        match &err {
            NflError::SourceUnavailable {
                table,
                kind,
                message,
            } => {
                assert_eq!(table, "weekly_stats");
                assert!(kind.ends_with("Error"));
                assert!(kind.contains("io"));
                assert_eq!(message, "upstream timed out");
            }
            _ => panic!("Expected SourceUnavailable error variant"),
        }

        let display = err.to_string();
        assert!(display.contains("weekly_stats"));
        assert!(display.contains("upstream timed out"));
    }

    #[test]
    fn test_refresh_failed_display() {
        let err = NflError::RefreshFailed {
            table: "pbp_data".to_string(),
            scope: "season 2023".to_string(),
            cause: "constraint failed".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("pbp_data"));
        assert!(display.contains("season 2023"));
        assert!(display.contains("rolled back"));
    }

    #[test]
    fn test_error_kind_names_type() {
        let err = io::Error::new(io::ErrorKind::Other, "x");
        assert_eq!(error_kind(&err), "std::io::error::Error");
    }
}
