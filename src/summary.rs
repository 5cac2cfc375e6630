//! `smry_season`: one row per player season with roster details, per-game
//! averages, positional fantasy ranks and, when loaded, consensus rankings.

use rusqlite::TransactionBehavior;
use serde::Serialize;
use tracing::info;

use crate::ecr::LINKED_TABLE;
use crate::error::{NflError, Result};
use crate::fantasy::ScoringSystem;
use crate::schema::quote_ident;
use crate::storage::Database;

pub const SUMMARY_TABLE: &str = "smry_season";

/// Positions that get fantasy ranks.
pub const RANKED_POSITIONS: [&str; 5] = ["QB", "RB", "WR", "TE", "K"];

/// Stat columns that get a `<name>_per_game` companion when present.
const PER_GAME_COLUMNS: &[&str] = &[
    "completions",
    "attempts",
    "passing_yards",
    "passing_tds",
    "interceptions",
    "sacks",
    "sack_yards",
    "sack_fumbles",
    "sack_fumbles_lost",
    "passing_air_yards",
    "passing_yards_after_catch",
    "passing_first_downs",
    "passing_epa",
    "passing_2pt_conversions",
    "carries",
    "rushing_yards",
    "rushing_tds",
    "rushing_first_downs",
    "rushing_epa",
    "rushing_2pt_conversions",
    "receptions",
    "targets",
    "receiving_yards",
    "receiving_tds",
    "receiving_air_yards",
    "receiving_yards_after_catch",
    "receiving_first_downs",
    "receiving_epa",
    "receiving_2pt_conversions",
    "racr",
    "target_share",
    "air_yards_share",
    "wopr",
    "special_teams_tds",
    "fantasy_points_std",
    "fantasy_points_half_ppr",
    "fantasy_points_full_ppr",
    "fantasy_points_ppr",
    "fumbles_lost",
];

/// Roster attributes carried into the summary, as (roster column, output name).
const ROSTER_COLUMNS: &[(&str, &str)] = &[
    ("player_name", "player_name"),
    ("position", "position"),
    ("years_exp", "years_exp"),
    ("draft_number", "draft_position"),
    ("weight", "weight"),
    ("height", "height"),
];

/// Ranking columns carried into the summary, per ranking list.
const ECR_COLUMNS: &[(&str, &str)] = &[
    ("rank", "rank"),
    ("best_rank", "best_rank"),
    ("worst_rank", "worst_rank"),
    ("avg_rank", "avg_rank"),
    ("stddev_rank", "stddev_rank"),
    ("adp", "adp"),
    ("vs_adp", "vs_adp"),
    ("position_rank", "position_rank"),
];

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub rows: i64,
    pub columns: usize,
    pub with_rankings: bool,
}

/// Short prefix used in rank column names: `std`, `halfppr`, `fullppr`.
fn rank_prefix(system: ScoringSystem) -> &'static str {
    match system {
        ScoringSystem::Standard => "std",
        ScoringSystem::HalfPpr => "halfppr",
        ScoringSystem::FullPpr => "fullppr",
    }
}

/// Rebuild `smry_season` from `seasonal_stats` and `rosters`.
pub fn create_season_summary(db: &mut Database) -> Result<SummaryStats> {
    for table in ["seasonal_stats", "rosters"] {
        if !db.table_exists(table)? {
            return Err(NflError::MissingTable {
                table: table.to_string(),
            });
        }
    }
    let with_rankings = db.table_exists(LINKED_TABLE)?;
    let sql = summary_sql(db, with_rankings)?;

    let tx = db.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute(&format!("DROP TABLE IF EXISTS {SUMMARY_TABLE}"), [])?;
    tx.execute(&sql, [])?;
    tx.commit()?;

    let stats = SummaryStats {
        rows: db.row_count(SUMMARY_TABLE)?,
        columns: db.table_info(SUMMARY_TABLE)?.len(),
        with_rankings,
    };
    info!(rows = stats.rows, columns = stats.columns, with_rankings, "Created season summary");
    Ok(stats)
}

fn summary_sql(db: &Database, with_rankings: bool) -> Result<String> {
    let seasonal: Vec<String> = db
        .table_info("seasonal_stats")?
        .into_iter()
        .map(|c| c.name)
        .collect();
    let rosters: Vec<String> = db.table_info("rosters")?.into_iter().map(|c| c.name).collect();
    let has_roster = |name: &str| rosters.iter().any(|c| c == name);
    let has_stat = |name: &str| seasonal.iter().any(|c| c == name);

    let mut roster_select = vec!["player_id".to_string(), "season".to_string()];
    for (column, _) in ROSTER_COLUMNS.iter().chain(&[("rookie_year", "rookie_year")]) {
        roster_select.push(if has_roster(column) {
            format!("MAX({c}) AS {c}", c = quote_ident(column))
        } else {
            format!("NULL AS {}", quote_ident(column))
        });
    }

    let overridden: Vec<&str> = ROSTER_COLUMNS.iter().map(|(_, out)| *out).collect();
    let mut base_select: Vec<String> = seasonal
        .iter()
        .filter(|c| !overridden.contains(&c.as_str()))
        .map(|c| format!("s.{}", quote_ident(c)))
        .collect();
    for (column, output) in ROSTER_COLUMNS {
        base_select.push(if has_stat(output) {
            format!("COALESCE(r.{}, s.{o}) AS {o}", quote_ident(column), o = quote_ident(output))
        } else {
            format!("r.{} AS {}", quote_ident(column), quote_ident(output))
        });
    }
    base_select.push(
        "CASE WHEN r.rookie_year IS NOT NULL AND s.season = CAST(r.rookie_year AS INTEGER) THEN 1 ELSE 0 END \
         AS is_rookie"
            .to_string(),
    );
    let games = if has_stat("games") { "s.games" } else { "NULL" };
    for column in PER_GAME_COLUMNS.iter().filter(|c| has_stat(c)) {
        base_select.push(format!(
            "CASE WHEN {games} > 0 THEN CAST(s.{c} AS REAL) / {games} ELSE 0.0 END AS {per_game}",
            c = quote_ident(column),
            per_game = quote_ident(&format!("{column}_per_game"))
        ));
    }

    let positions = RANKED_POSITIONS
        .iter()
        .map(|p| format!("'{p}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut rank_select = vec!["bd.*".to_string()];
    for per_game in [false, true] {
        for system in ScoringSystem::ALL {
            let column = system.column_name();
            let order = match (has_stat(column), per_game) {
                (false, _) => "NULL".to_string(),
                (true, false) => format!("bd.{column}"),
                (true, true) => format!("CASE WHEN bd.games > 0 THEN bd.{column} / bd.games ELSE 0 END"),
            };
            let suffix = if per_game { "ppg_rnk" } else { "tot_rnk" };
            rank_select.push(format!(
                "CASE WHEN bd.position IN ({positions}) THEN \
                 RANK() OVER (PARTITION BY bd.season, bd.position ORDER BY {order} DESC NULLS LAST) \
                 ELSE NULL END AS {}_{suffix}",
                rank_prefix(system)
            ));
        }
    }

    let mut sql = format!(
        "CREATE TABLE {SUMMARY_TABLE} AS
         WITH roster_summary AS (
             SELECT {roster} FROM rosters GROUP BY player_id, season
         ),
         base_data AS (
             SELECT {base}
             FROM seasonal_stats s
             LEFT JOIN roster_summary r ON s.player_id = r.player_id AND s.season = r.season
         ),
         ranked_data AS (
             SELECT {ranked} FROM base_data bd
         )",
        roster = roster_select.join(", "),
        base = base_select.join(",\n                    "),
        ranked = rank_select.join(",\n                    "),
    );

    if !with_rankings {
        sql.push_str(" SELECT * FROM ranked_data");
        return Ok(sql);
    }

    // before_preseason = 0 rankings are the preseason list
    let mut ecr_select = vec!["player_id".to_string(), "year AS season".to_string()];
    let mut outer = vec!["rd.*".to_string()];
    for (flag, prefix) in [(0, "ecr_preszn"), (1, "ecr")] {
        for (column, output) in ECR_COLUMNS {
            let name = format!("{prefix}_{output}");
            ecr_select.push(format!(
                "MAX(CASE WHEN before_preseason = {flag} THEN {} END) AS {name}",
                quote_ident(column)
            ));
            outer.push(format!("ecr.{name}"));
        }
    }
    sql.push_str(&format!(
        ",
         ecr_summary AS (
             SELECT {ecr} FROM {LINKED_TABLE} WHERE player_id IS NOT NULL GROUP BY player_id, year
         )
         SELECT {outer}
         FROM ranked_data rd
         LEFT JOIN ecr_summary ecr ON rd.player_id = ecr.player_id AND rd.season = ecr.season",
        ecr = ecr_select.join(", "),
        outer = outer.join(", "),
    ));

    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{DataType, Season};
    use crate::extract::{prepare_table, RawTable};
    use crate::storage::RefreshScope;
    use crate::value::Value;

    fn load(db: &mut Database, data_type: DataType, csv: &str) {
        let raw = RawTable::parse_csv(csv.as_bytes()).unwrap();
        let data = prepare_table(data_type, raw).unwrap();
        db.refresh(&data, RefreshScope::Season(Season::new(2023))).unwrap();
    }

    fn seeded_db() -> Database {
        let mut db = Database::new_in_memory().unwrap();
        load(
            &mut db,
            DataType::SeasonalStats,
            "player_id,player_name,position,season,week,season_type,receptions,receiving_yards\n\
             wr1,A.One,WR,2023,1,REG,10,100\n\
             wr1,A.One,WR,2023,2,REG,6,60\n\
             wr2,B.Two,WR,2023,1,REG,12,150\n\
             ol1,C.Three,T,2023,1,REG,0,0\n",
        );
        load(
            &mut db,
            DataType::Rosters,
            "season,week,team,position,full_name,gsis_id,years_exp,draft_number,rookie_year\n\
             2023,1,KC,WR,Alpha One,wr1,3,12,2020\n\
             2023,2,KC,WR,Alpha One,wr1,3,12,2020\n\
             2023,1,DET,WR,Beta Two,wr2,0,40,2023\n",
        );
        db
    }

    #[test]
    fn test_requires_source_tables() {
        let mut db = Database::new_in_memory().unwrap();
        assert!(matches!(
            create_season_summary(&mut db),
            Err(NflError::MissingTable { .. })
        ));
    }

    #[test]
    fn test_season_summary() {
        let mut db = seeded_db();
        let stats = create_season_summary(&mut db).unwrap();

        assert_eq!(stats.rows, 3);
        assert!(!stats.with_rankings);

        let result = db
            .query(
                "SELECT player_id, player_name, games, receptions_per_game, is_rookie, draft_position,
                        std_tot_rnk, std_ppg_rnk
                 FROM smry_season ORDER BY player_id",
            )
            .unwrap();

        let wr1 = &result.rows[1];
        assert_eq!(wr1[0], Value::Text("wr1".into()));
        assert_eq!(wr1[1], Value::Text("Alpha One".into()));
        assert_eq!(wr1[2], Value::Integer(2));
        assert_eq!(wr1[3], Value::Real(8.0));
        assert_eq!(wr1[4], Value::Integer(0));
        assert_eq!(wr1[5], Value::Integer(12));
        // 16.0 total beats 15.0, but 8.0 per game trails
        assert_eq!(wr1[6], Value::Integer(1));
        assert_eq!(wr1[7], Value::Integer(2));

        let wr2 = &result.rows[2];
        assert_eq!(wr2[4], Value::Integer(1));
        assert_eq!(wr2[6], Value::Integer(2));

        // tackles are not ranked
        let ol1 = &result.rows[0];
        assert_eq!(ol1[6], Value::Null);
    }

    #[test]
    fn test_summary_is_rebuilt() {
        let mut db = seeded_db();
        create_season_summary(&mut db).unwrap();
        let stats = create_season_summary(&mut db).unwrap();
        assert_eq!(stats.rows, 3);
    }
}
