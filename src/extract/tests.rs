//! Extractor tests against an in-memory source

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::value::Value;

/// Serves canned tables; anything not registered fails like a refused
/// connection.
#[derive(Default)]
struct StaticSource {
    tables: HashMap<(DataType, Option<Season>), RawTable>,
    calls: AtomicUsize,
}

impl StaticSource {
    fn with(mut self, data_type: DataType, season: Option<Season>, csv: &str) -> Self {
        let table = RawTable::parse_csv(csv.as_bytes()).unwrap();
        self.tables.insert((data_type, season), table);
        self
    }
}

impl DataSource for StaticSource {
    async fn fetch(&self, data_type: DataType, season: Option<Season>) -> std::result::Result<RawTable, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.tables.get(&(data_type, season)).cloned().ok_or_else(|| {
            let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
            SourceError::from_error(&err)
        })
    }
}

const TEAMS: &str = "team_abbr,team_name,team_conf\nKC,Kansas City Chiefs,AFC\nDET,Detroit Lions,NFC\n";
const GAMES_2023: &str = "game_id,season,week,gameday,home_team,away_team\n\
2023_01_DET_KC,2023,1,2023-09-07,KC,DET\n\
2023_01_ARI_WAS,2023,1,2023-09-10,WAS,ARI\n";
const WEEKLY_2023: &str = "player_id,player_name,season,week,season_type,receptions,receiving_yards\n\
p1,A.One,2023,1,REG,5,50\n\
p1,A.One,2023,2,REG,3,30\n";
const WEEKLY_2023_WEEK2: &str = "player_id,player_name,season,week,season_type,receptions,receiving_yards\n\
p1,A.One,2023,1,REG,99,990\n\
p1,A.One,2023,2,REG,7,70\n";

fn season() -> Season {
    Season::new(2023)
}

#[tokio::test]
async fn test_concurrent_extraction_isolates_failures() {
    let source = StaticSource::default()
        .with(DataType::Teams, None, TEAMS)
        .with(DataType::Schedules, Some(season()), GAMES_2023);
    let mut extractor = Extractor::new(Database::new_in_memory().unwrap(), source);

    let jobs = vec![
        Job::reference(DataType::Teams),
        Job::season(DataType::Schedules, season()),
        Job::season(DataType::Injuries, season()),
    ];
    let summary = extractor.run_jobs(jobs, 2).await;

    assert_eq!(summary.outcomes.len(), 3);
    assert_eq!(summary.succeeded().count(), 2);
    assert!(summary.has_failures());
    assert_eq!(summary.total_records(), 4);

    let failed = summary.outcome(DataType::Injuries, Some(season())).unwrap();
    match failed.error.as_ref().unwrap() {
        NflError::SourceUnavailable { table, kind, message } => {
            assert_eq!(table, "injuries");
            assert_eq!(kind, "std::io::error::Error");
            assert_eq!(message, "connection refused");
        }
        other => panic!("Expected SourceUnavailable, got {other:?}"),
    }

    let db = extractor.database();
    assert_eq!(db.row_count("teams").unwrap(), 2);
    assert_eq!(db.row_count("schedules").unwrap(), 2);
    assert!(!db.table_exists("injuries").unwrap());

    let logged = db.last_refresh("injuries", 2023, None).unwrap().unwrap();
    assert_eq!(logged.status, RefreshStatus::Failed);
    assert!(logged.error_message.unwrap().contains("std::io::error::Error: connection refused"));

    let teams = db.last_refresh("teams", 0, None).unwrap().unwrap();
    assert_eq!(teams.status, RefreshStatus::Success);
    assert_eq!(teams.records_processed, 2);
}

/// Panics while fetching one data type.
struct PanickingSource {
    inner: StaticSource,
    panics_on: DataType,
}

impl DataSource for PanickingSource {
    async fn fetch(&self, data_type: DataType, season: Option<Season>) -> std::result::Result<RawTable, SourceError> {
        if data_type == self.panics_on {
            panic!("malformed payload for {data_type}");
        }
        self.inner.fetch(data_type, season).await
    }
}

#[tokio::test]
async fn test_panicked_task_is_logged_as_failed() {
    let source = PanickingSource {
        inner: StaticSource::default()
            .with(DataType::Teams, None, TEAMS)
            .with(DataType::Schedules, Some(season()), GAMES_2023),
        panics_on: DataType::Injuries,
    };
    let mut extractor = Extractor::new(Database::new_in_memory().unwrap(), source);

    let jobs = vec![
        Job::reference(DataType::Teams),
        Job::season(DataType::Injuries, season()),
        Job::season(DataType::Schedules, season()),
    ];
    let summary = extractor.run_jobs(jobs, 2).await;

    assert_eq!(summary.outcomes.len(), 3);
    assert_eq!(summary.succeeded().count(), 2);
    assert!(summary.has_failures());

    let failed = summary.outcome(DataType::Injuries, Some(season())).unwrap();
    match failed.error.as_ref().unwrap() {
        NflError::TaskFailed { table, message } => {
            assert_eq!(table, "injuries");
            assert!(message.contains("panicked"), "{message}");
        }
        other => panic!("Expected TaskFailed, got {other:?}"),
    }

    let logged = extractor
        .database()
        .last_refresh("injuries", 2023, None)
        .unwrap()
        .unwrap();
    assert_eq!(logged.status, RefreshStatus::Failed);
    assert!(logged.error_message.unwrap().contains("did not complete"));
    assert_eq!(extractor.database().row_count("schedules").unwrap(), 2);
}

#[tokio::test]
async fn test_extract_all_schedules_every_entity() {
    let source = StaticSource::default();
    let mut extractor = Extractor::new(Database::new_in_memory().unwrap(), source);

    let summary = extractor
        .extract_all(&[Season::new(2022), Season::new(2023)], 4)
        .await;

    assert_eq!(summary.outcomes.len(), 2 + 2 * DataType::SEASONAL.len());
    assert_eq!(summary.failed().count(), summary.outcomes.len());
    assert_eq!(extractor.source.calls.load(Ordering::SeqCst), summary.outcomes.len());
}

#[tokio::test]
async fn test_refresh_season_is_idempotent() {
    let source = StaticSource::default().with(DataType::WeeklyStats, Some(season()), WEEKLY_2023);
    let mut extractor = Extractor::new(Database::new_in_memory().unwrap(), source);
    let kinds = [DataType::WeeklyStats];

    let first = extractor.refresh_season(season(), &kinds, 1).await;
    assert!(!first.has_failures());
    let before = extractor
        .database()
        .query("SELECT * FROM weekly_stats ORDER BY week")
        .unwrap();

    extractor.refresh_season(season(), &kinds, 1).await;
    let after = extractor
        .database()
        .query("SELECT * FROM weekly_stats ORDER BY week")
        .unwrap();

    assert_eq!(before, after);
    assert_eq!(after.rows.len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_keeps_loaded_season() {
    let source = StaticSource::default().with(DataType::Schedules, Some(season()), GAMES_2023);
    let mut extractor = Extractor::new(Database::new_in_memory().unwrap(), source);
    extractor
        .refresh_season(season(), &[DataType::Schedules], 1)
        .await;

    let mut extractor = Extractor::new(extractor.into_database(), StaticSource::default());
    let summary = extractor
        .refresh_season(season(), &[DataType::Schedules], 1)
        .await;

    assert!(summary.has_failures());
    assert_eq!(extractor.database().row_count("schedules").unwrap(), 2);
}

#[tokio::test]
async fn test_refresh_week_replaces_one_week() {
    let source = StaticSource::default().with(DataType::WeeklyStats, Some(season()), WEEKLY_2023);
    let mut extractor = Extractor::new(Database::new_in_memory().unwrap(), source);
    extractor
        .refresh_season(season(), &[DataType::WeeklyStats], 1)
        .await;

    let source = StaticSource::default().with(DataType::WeeklyStats, Some(season()), WEEKLY_2023_WEEK2);
    let mut extractor = Extractor::new(extractor.into_database(), source);
    let summary = extractor.refresh_week(season(), Week::new(2)).await;

    assert!(!summary.has_failures());
    assert_eq!(summary.total_records(), 1);

    let result = extractor
        .database()
        .query("SELECT week, receptions, fantasy_points_full_ppr FROM weekly_stats ORDER BY week")
        .unwrap();
    assert_eq!(
        result.rows,
        vec![
            vec![Value::Integer(1), Value::Integer(5), Value::Real(10.0)],
            vec![Value::Integer(2), Value::Integer(7), Value::Real(14.0)],
        ]
    );

    let logged = extractor
        .database()
        .last_refresh("weekly_stats", 2023, Some(2))
        .unwrap()
        .unwrap();
    assert_eq!(logged.status, RefreshStatus::Success);
}

#[tokio::test]
async fn test_seasonal_stats_rolled_up_from_weekly() {
    let source = StaticSource::default().with(DataType::SeasonalStats, Some(season()), WEEKLY_2023);
    let mut extractor = Extractor::new(Database::new_in_memory().unwrap(), source);
    extractor
        .refresh_season(season(), &[DataType::SeasonalStats], 1)
        .await;

    let result = extractor
        .database()
        .query("SELECT games, receptions, receiving_yards FROM seasonal_stats")
        .unwrap();
    assert_eq!(
        result.rows,
        vec![vec![Value::Integer(2), Value::Integer(8), Value::Real(80.0)]]
    );
}

#[test]
fn test_job_scopes() {
    assert_eq!(Job::reference(DataType::Teams).scope(), RefreshScope::All);
    assert_eq!(Job::season(DataType::Players, season()).scope(), RefreshScope::All);
    assert_eq!(
        Job::season(DataType::Rosters, season()).scope(),
        RefreshScope::Season(season())
    );
    assert_eq!(
        Job::week(season(), Week::new(3)).scope(),
        RefreshScope::SeasonWeek(season(), Week::new(3))
    );
}
