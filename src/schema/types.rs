//! Type Mapper: source column name to SQL column type.
//!
//! The table below covers the columns published by the nflverse releases
//! (teams, players, schedules, player stats, rosters, injuries and
//! play-by-play) plus the columns this crate derives. Anything not listed
//! maps to `TEXT`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{NflError, Result};

/// Column types understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    Integer,
    Real,
    Boolean,
    Date,
    Time,
    Timestamp,
    Text,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Text => "TEXT",
        }
    }

    /// Integer and real columns take part in NULL-rate checks and numeric
    /// aggregation.
    pub fn is_numeric(&self) -> bool {
        matches!(self, SqlType::Integer | SqlType::Real)
    }

    /// Parse a declared column type as reported by SQLite. Unknown
    /// declarations are `None`.
    pub fn from_declared(decl: &str) -> Option<SqlType> {
        decl.parse().ok()
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SqlType {
    type Err = NflError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "INTEGER" | "INT" | "BIGINT" | "SMALLINT" | "TINYINT" => Ok(SqlType::Integer),
            "REAL" | "DOUBLE" | "FLOAT" | "NUMERIC" => Ok(SqlType::Real),
            "BOOLEAN" | "BOOL" => Ok(SqlType::Boolean),
            "DATE" => Ok(SqlType::Date),
            "TIME" => Ok(SqlType::Time),
            "TIMESTAMP" | "DATETIME" => Ok(SqlType::Timestamp),
            "TEXT" | "VARCHAR" => Ok(SqlType::Text),
            other => Err(NflError::Config {
                message: format!("unknown column type {other}"),
            }),
        }
    }
}

/// Source column names that are SQL keywords, and the names they are stored
/// under. Every query site must use the right-hand name.
pub const RESERVED_RENAMES: &[(&str, &str)] = &[
    ("desc", "play_description"),
    ("order", "play_order"),
    ("time", "game_time"),
    ("date", "game_date_field"),
];

/// Stored name for a source column.
pub fn canonical_column_name(name: &str) -> &str {
    RESERVED_RENAMES
        .iter()
        .find(|(original, _)| original.eq_ignore_ascii_case(name))
        .map(|(_, renamed)| *renamed)
        .unwrap_or(name)
}

/// The renamed column for a reserved source name, if `name` is one.
pub fn renamed_from_reserved(name: &str) -> Option<&'static str> {
    RESERVED_RENAMES
        .iter()
        .find(|(original, _)| original.eq_ignore_ascii_case(name))
        .map(|(_, renamed)| *renamed)
}

/// The rename table must be injective and must not produce another reserved
/// name.
pub fn check_rename_table() -> Result<()> {
    for (i, (original, renamed)) in RESERVED_RENAMES.iter().enumerate() {
        for (other_original, other_renamed) in &RESERVED_RENAMES[i + 1..] {
            if renamed == other_renamed {
                return Err(NflError::SchemaConflict {
                    table: "*".to_string(),
                    message: format!(
                        "columns {original} and {other_original} both rename to {renamed}"
                    ),
                });
            }
        }
        if renamed_from_reserved(renamed).is_some() {
            return Err(NflError::SchemaConflict {
                table: "*".to_string(),
                message: format!("{original} renames to reserved name {renamed}"),
            });
        }
    }
    Ok(())
}

/// Mapped type for a (stored) column name, if the column is known.
pub fn known_type(column: &str) -> Option<SqlType> {
    column_types().get(column).copied()
}

/// Mapped type for a column; unknown columns are `TEXT`.
pub fn sql_type_for(column: &str) -> SqlType {
    known_type(column).unwrap_or(SqlType::Text)
}

fn column_types() -> &'static HashMap<&'static str, SqlType> {
    static TYPES: OnceLock<HashMap<&'static str, SqlType>> = OnceLock::new();
    TYPES.get_or_init(|| COLUMN_TYPES.iter().copied().collect())
}

static COLUMN_TYPES: &[(&str, SqlType)] = &[
    ("season", SqlType::Integer),
    ("week", SqlType::Integer),
    ("game_id", SqlType::Text),
    ("play_id", SqlType::Text),
    ("player_id", SqlType::Text),
    ("team", SqlType::Text),
    ("opponent_team", SqlType::Text),
    ("game_date", SqlType::Date),
    ("gameday", SqlType::Date),
    ("gametime", SqlType::Time),
    ("datetime", SqlType::Timestamp),
    ("report_date", SqlType::Date),
    ("report_primary_injury", SqlType::Text),
    ("report_secondary_injury", SqlType::Text),
    ("report_status", SqlType::Text),
    ("completions", SqlType::Integer),
    ("attempts", SqlType::Integer),
    ("passing_yards", SqlType::Real),
    ("passing_tds", SqlType::Integer),
    ("interceptions", SqlType::Real),
    ("sacks", SqlType::Real),
    ("sack_yards", SqlType::Real),
    ("sack_fumbles", SqlType::Integer),
    ("sack_fumbles_lost", SqlType::Integer),
    ("passing_air_yards", SqlType::Real),
    ("passing_yards_after_catch", SqlType::Real),
    ("passing_first_downs", SqlType::Real),
    ("passing_epa", SqlType::Real),
    ("passing_2pt_conversions", SqlType::Integer),
    ("pacr", SqlType::Real),
    ("dakota", SqlType::Real),
    ("carries", SqlType::Integer),
    ("rushing_yards", SqlType::Real),
    ("rushing_tds", SqlType::Integer),
    ("rushing_fumbles", SqlType::Real),
    ("rushing_fumbles_lost", SqlType::Real),
    ("rushing_first_downs", SqlType::Real),
    ("rushing_epa", SqlType::Real),
    ("rushing_2pt_conversions", SqlType::Integer),
    ("receptions", SqlType::Integer),
    ("targets", SqlType::Integer),
    ("receiving_yards", SqlType::Real),
    ("receiving_tds", SqlType::Integer),
    ("receiving_fumbles", SqlType::Real),
    ("receiving_fumbles_lost", SqlType::Real),
    ("receiving_air_yards", SqlType::Real),
    ("receiving_yards_after_catch", SqlType::Real),
    ("receiving_first_downs", SqlType::Real),
    ("receiving_epa", SqlType::Real),
    ("receiving_2pt_conversions", SqlType::Integer),
    ("racr", SqlType::Real),
    ("target_share", SqlType::Real),
    ("air_yards_share", SqlType::Real),
    ("wopr", SqlType::Real),
    ("special_teams_tds", SqlType::Real),
    ("fantasy_points", SqlType::Real),
    ("fantasy_points_ppr", SqlType::Real),
    ("down", SqlType::Integer),
    ("yards_gained", SqlType::Real),
    ("quarter", SqlType::Integer),
    ("play_clock", SqlType::Integer),
    ("drive", SqlType::Integer),
    ("sp", SqlType::Boolean),
    ("qtr", SqlType::Integer),
    ("drive_play_count", SqlType::Integer),
    ("drive_time_of_possession", SqlType::Real),
    ("drive_first_downs", SqlType::Integer),
    ("drive_inside20", SqlType::Boolean),
    ("drive_ended_with_score", SqlType::Boolean),
    ("drive_quarter_start", SqlType::Integer),
    ("drive_quarter_end", SqlType::Integer),
    ("drive_yards_penalized", SqlType::Integer),
    ("drive_start_transition", SqlType::Text),
    ("drive_end_transition", SqlType::Text),
    ("drive_game_clock_start", SqlType::Text),
    ("drive_game_clock_end", SqlType::Text),
    ("drive_start_yard_line", SqlType::Integer),
    ("drive_end_yard_line", SqlType::Integer),
    ("series_success", SqlType::Boolean),
    ("series_result", SqlType::Text),
    ("play_order", SqlType::Integer),
    ("order_sequence", SqlType::Integer),
    ("play_type", SqlType::Text),
    ("play_type_nfl", SqlType::Text),
    ("fixed_drive", SqlType::Integer),
    ("fixed_drive_result", SqlType::Text),
    ("drive_real_start_time", SqlType::Real),
    ("series", SqlType::Integer),
    ("yards_to_go", SqlType::Integer),
    ("goal_to_go", SqlType::Boolean),
    ("first_down_rush", SqlType::Boolean),
    ("first_down_pass", SqlType::Boolean),
    ("first_down_penalty", SqlType::Boolean),
    ("third_down_converted", SqlType::Boolean),
    ("third_down_failed", SqlType::Boolean),
    ("fourth_down_converted", SqlType::Boolean),
    ("fourth_down_failed", SqlType::Boolean),
    ("incomplete_pass", SqlType::Boolean),
    ("touchback", SqlType::Boolean),
    ("interception", SqlType::Boolean),
    ("punt_blocked", SqlType::Boolean),
    ("first_down", SqlType::Boolean),
    ("fumble", SqlType::Boolean),
    ("complete_pass", SqlType::Boolean),
    ("assist_tackle", SqlType::Boolean),
    ("lateral_reception", SqlType::Boolean),
    ("lateral_rush", SqlType::Boolean),
    ("lateral_return", SqlType::Boolean),
    ("lateral_recovery", SqlType::Boolean),
    ("passer_player_id", SqlType::Text),
    ("passer_player_name", SqlType::Text),
    ("receiver_player_id", SqlType::Text),
    ("receiver_player_name", SqlType::Text),
    ("rusher_player_id", SqlType::Text),
    ("rusher_player_name", SqlType::Text),
    ("lateral_receiver_player_id", SqlType::Text),
    ("lateral_receiver_player_name", SqlType::Text),
    ("lateral_rusher_player_id", SqlType::Text),
    ("lateral_rusher_player_name", SqlType::Text),
    ("lateral_sack_player_id", SqlType::Text),
    ("lateral_sack_player_name", SqlType::Text),
    ("interception_player_id", SqlType::Text),
    ("interception_player_name", SqlType::Text),
    ("lateral_interception_player_id", SqlType::Text),
    ("lateral_interception_player_name", SqlType::Text),
    ("punt_returner_player_id", SqlType::Text),
    ("punt_returner_player_name", SqlType::Text),
    ("lateral_punt_returner_player_id", SqlType::Text),
    ("lateral_punt_returner_player_name", SqlType::Text),
    ("kickoff_returner_player_name", SqlType::Text),
    ("kickoff_returner_player_id", SqlType::Text),
    ("lateral_kickoff_returner_player_id", SqlType::Text),
    ("lateral_kickoff_returner_player_name", SqlType::Text),
    ("punter_player_id", SqlType::Text),
    ("punter_player_name", SqlType::Text),
    ("kicker_player_name", SqlType::Text),
    ("kicker_player_id", SqlType::Text),
    ("own_kickoff_recovery_player_id", SqlType::Text),
    ("own_kickoff_recovery_player_name", SqlType::Text),
    ("blocked_player_id", SqlType::Text),
    ("blocked_player_name", SqlType::Text),
    ("tackle_for_loss_1_player_id", SqlType::Text),
    ("tackle_for_loss_1_player_name", SqlType::Text),
    ("tackle_for_loss_2_player_id", SqlType::Text),
    ("tackle_for_loss_2_player_name", SqlType::Text),
    ("qb_hit_1_player_id", SqlType::Text),
    ("qb_hit_1_player_name", SqlType::Text),
    ("qb_hit_2_player_id", SqlType::Text),
    ("qb_hit_2_player_name", SqlType::Text),
    ("forced_fumble_player_1_team", SqlType::Text),
    ("forced_fumble_player_1_player_id", SqlType::Text),
    ("forced_fumble_player_1_player_name", SqlType::Text),
    ("forced_fumble_player_2_team", SqlType::Text),
    ("forced_fumble_player_2_player_id", SqlType::Text),
    ("forced_fumble_player_2_player_name", SqlType::Text),
    ("solo_tackle_1_team", SqlType::Text),
    ("solo_tackle_1_player_id", SqlType::Text),
    ("solo_tackle_1_player_name", SqlType::Text),
    ("solo_tackle_2_team", SqlType::Text),
    ("solo_tackle_2_player_id", SqlType::Text),
    ("solo_tackle_2_player_name", SqlType::Text),
    ("assist_tackle_1_player_id", SqlType::Text),
    ("assist_tackle_1_player_name", SqlType::Text),
    ("assist_tackle_1_team", SqlType::Text),
    ("assist_tackle_2_player_id", SqlType::Text),
    ("assist_tackle_2_player_name", SqlType::Text),
    ("assist_tackle_2_team", SqlType::Text),
    ("assist_tackle_3_player_id", SqlType::Text),
    ("assist_tackle_3_player_name", SqlType::Text),
    ("assist_tackle_3_team", SqlType::Text),
    ("assist_tackle_4_player_id", SqlType::Text),
    ("assist_tackle_4_player_name", SqlType::Text),
    ("assist_tackle_4_team", SqlType::Text),
    ("pass_defense_1_player_id", SqlType::Text),
    ("pass_defense_1_player_name", SqlType::Text),
    ("pass_defense_2_player_id", SqlType::Text),
    ("pass_defense_2_player_name", SqlType::Text),
    ("fumbled_1_team", SqlType::Text),
    ("fumbled_1_player_id", SqlType::Text),
    ("fumbled_1_player_name", SqlType::Text),
    ("fumbled_2_team", SqlType::Text),
    ("fumbled_2_player_id", SqlType::Text),
    ("fumbled_2_player_name", SqlType::Text),
    ("fumble_recovery_1_team", SqlType::Text),
    ("fumble_recovery_1_player_id", SqlType::Text),
    ("fumble_recovery_1_player_name", SqlType::Text),
    ("fumble_recovery_2_team", SqlType::Text),
    ("fumble_recovery_2_player_id", SqlType::Text),
    ("fumble_recovery_2_player_name", SqlType::Text),
    ("fumble_recovery_1_yards", SqlType::Real),
    ("fumble_recovery_2_yards", SqlType::Real),
    ("return_yards", SqlType::Real),
    ("penalty_yards", SqlType::Real),
    ("replay_or_challenge", SqlType::Boolean),
    ("replay_or_challenge_result", SqlType::Text),
    ("penalty_type", SqlType::Text),
    ("penalty_player_id", SqlType::Text),
    ("penalty_player_name", SqlType::Text),
    ("penalty_player_team", SqlType::Text),
    ("tackle_with_assist", SqlType::Boolean),
    ("tackle_with_assist_1_player_id", SqlType::Text),
    ("tackle_with_assist_1_player_name", SqlType::Text),
    ("tackle_with_assist_1_team", SqlType::Text),
    ("tackle_with_assist_2_player_id", SqlType::Text),
    ("tackle_with_assist_2_player_name", SqlType::Text),
    ("tackle_with_assist_2_team", SqlType::Text),
    ("fumbled_1_forced", SqlType::Boolean),
    ("fumbled_2_forced", SqlType::Boolean),
    ("fumbled_1_not_forced", SqlType::Boolean),
    ("fumbled_2_not_forced", SqlType::Boolean),
    ("fumble_out_of_bounds", SqlType::Boolean),
    ("safety_player_name", SqlType::Text),
    ("safety_player_id", SqlType::Text),
    ("season_type", SqlType::Text),
    ("posteam", SqlType::Text),
    ("posteam_type", SqlType::Text),
    ("defteam", SqlType::Text),
    ("side_of_field", SqlType::Text),
    ("yardline_100", SqlType::Integer),
    ("quarter_seconds_remaining", SqlType::Integer),
    ("half_seconds_remaining", SqlType::Integer),
    ("game_seconds_remaining", SqlType::Integer),
    ("game_half", SqlType::Text),
    ("quarter_end", SqlType::Boolean),
    ("game_time", SqlType::Text),
    ("yrdln", SqlType::Text),
    ("ydstogo", SqlType::Integer),
    ("ydsnet", SqlType::Integer),
    ("play_description", SqlType::Text),
    ("shotgun", SqlType::Boolean),
    ("no_huddle", SqlType::Boolean),
    ("qb_dropback", SqlType::Boolean),
    ("qb_kneel", SqlType::Boolean),
    ("qb_spike", SqlType::Boolean),
    ("qb_scramble", SqlType::Boolean),
    ("pass_length", SqlType::Text),
    ("pass_location", SqlType::Text),
    ("air_yards", SqlType::Real),
    ("yards_after_catch", SqlType::Real),
    ("run_location", SqlType::Text),
    ("run_gap", SqlType::Text),
    ("field_goal_result", SqlType::Text),
    ("kick_distance", SqlType::Integer),
    ("extra_point_result", SqlType::Text),
    ("two_point_conv_result", SqlType::Text),
    ("home_timeouts_remaining", SqlType::Integer),
    ("away_timeouts_remaining", SqlType::Integer),
    ("timeout", SqlType::Boolean),
    ("timeout_team", SqlType::Text),
    ("td_team", SqlType::Text),
    ("td_player_name", SqlType::Text),
    ("td_player_id", SqlType::Text),
    ("posteam_timeouts_remaining", SqlType::Integer),
    ("defteam_timeouts_remaining", SqlType::Integer),
    ("total_home_score", SqlType::Integer),
    ("total_away_score", SqlType::Integer),
    ("posteam_score", SqlType::Integer),
    ("defteam_score", SqlType::Integer),
    ("score_differential", SqlType::Integer),
    ("posteam_score_post", SqlType::Integer),
    ("defteam_score_post", SqlType::Integer),
    ("score_differential_post", SqlType::Integer),
    ("no_score_prob", SqlType::Real),
    ("opp_fg_prob", SqlType::Real),
    ("opp_safety_prob", SqlType::Real),
    ("opp_td_prob", SqlType::Real),
    ("fg_prob", SqlType::Real),
    ("safety_prob", SqlType::Real),
    ("td_prob", SqlType::Real),
    ("extra_point_prob", SqlType::Real),
    ("two_point_conversion_prob", SqlType::Real),
    ("ep", SqlType::Real),
    ("epa", SqlType::Real),
    ("total_home_epa", SqlType::Real),
    ("total_away_epa", SqlType::Real),
    ("total_home_rush_epa", SqlType::Real),
    ("total_away_rush_epa", SqlType::Real),
    ("total_home_pass_epa", SqlType::Real),
    ("total_away_pass_epa", SqlType::Real),
    ("air_epa", SqlType::Real),
    ("yac_epa", SqlType::Real),
    ("comp_air_epa", SqlType::Real),
    ("comp_yac_epa", SqlType::Real),
    ("total_home_comp_air_epa", SqlType::Real),
    ("total_away_comp_air_epa", SqlType::Real),
    ("total_home_comp_yac_epa", SqlType::Real),
    ("total_away_comp_yac_epa", SqlType::Real),
    ("total_home_raw_air_epa", SqlType::Real),
    ("total_away_raw_air_epa", SqlType::Real),
    ("total_home_raw_yac_epa", SqlType::Real),
    ("total_away_raw_yac_epa", SqlType::Real),
    ("wp", SqlType::Real),
    ("def_wp", SqlType::Real),
    ("home_wp", SqlType::Real),
    ("away_wp", SqlType::Real),
    ("wpa", SqlType::Real),
    ("vegas_wpa", SqlType::Real),
    ("vegas_home_wpa", SqlType::Real),
    ("home_wp_post", SqlType::Real),
    ("away_wp_post", SqlType::Real),
    ("vegas_wp", SqlType::Real),
    ("vegas_home_wp", SqlType::Real),
    ("total_home_rush_wpa", SqlType::Real),
    ("total_away_rush_wpa", SqlType::Real),
    ("total_home_pass_wpa", SqlType::Real),
    ("total_away_pass_wpa", SqlType::Real),
    ("air_wpa", SqlType::Real),
    ("yac_wpa", SqlType::Real),
    ("comp_air_wpa", SqlType::Real),
    ("comp_yac_wpa", SqlType::Real),
    ("total_home_comp_air_wpa", SqlType::Real),
    ("total_away_comp_air_wpa", SqlType::Real),
    ("total_home_comp_yac_wpa", SqlType::Real),
    ("total_away_comp_yac_wpa", SqlType::Real),
    ("total_home_raw_air_wpa", SqlType::Real),
    ("total_away_raw_air_wpa", SqlType::Real),
    ("total_home_raw_yac_wpa", SqlType::Real),
    ("total_away_raw_yac_wpa", SqlType::Real),
    ("fantasy_player_name", SqlType::Text),
    ("fantasy_player_id", SqlType::Text),
    ("fantasy_position", SqlType::Text),
    ("cpoe", SqlType::Real),
    ("gsis_id", SqlType::Text),
    ("pff_id", SqlType::Text),
    ("pfr_id", SqlType::Text),
    ("sleeper_id", SqlType::Text),
    ("nfl_id", SqlType::Text),
    ("espn_id", SqlType::Text),
    ("yahoo_id", SqlType::Text),
    ("rotowire_id", SqlType::Text),
    ("sportradar_id", SqlType::Text),
    ("stats_id", SqlType::Text),
    ("stats_global_id", SqlType::Text),
    ("fantasy_data_id", SqlType::Text),
    ("first_name", SqlType::Text),
    ("last_name", SqlType::Text),
    ("position", SqlType::Text),
    ("position_group", SqlType::Text),
    ("jersey_number", SqlType::Integer),
    ("height", SqlType::Text),
    ("weight", SqlType::Integer),
    ("college", SqlType::Text),
    ("high_school", SqlType::Text),
    ("birth_date", SqlType::Date),
    ("entry_year", SqlType::Integer),
    ("rookie_year", SqlType::Integer),
    ("draft_club", SqlType::Text),
    ("draft_number", SqlType::Integer),
    ("draft_round", SqlType::Integer),
    ("draft_position", SqlType::Integer),
    ("status", SqlType::Text),
    ("headshot_url", SqlType::Text),
    ("ngs_position", SqlType::Text),
    ("depth_chart_position", SqlType::Text),
    ("years_exp", SqlType::Integer),
    ("status_description_abbr", SqlType::Text),
    ("status_short_description", SqlType::Text),
    ("gsis_it_id", SqlType::Text),
    ("smart_id", SqlType::Text),
    ("full_name", SqlType::Text),
    ("team_name", SqlType::Text),
    ("team_logo_espn", SqlType::Text),
    ("team_logo_wikipedia", SqlType::Text),
    ("team_wordmark", SqlType::Text),
    ("team_color", SqlType::Text),
    ("team_color2", SqlType::Text),
    ("team_color3", SqlType::Text),
    ("team_color4", SqlType::Text),
    ("nfl_api_id", SqlType::Text),
    ("team_nick", SqlType::Text),
    ("team_abbr", SqlType::Text),
    ("team_id", SqlType::Text),
    ("team_id_pfr", SqlType::Text),
    ("team_conf", SqlType::Text),
    ("team_division", SqlType::Text),
    ("team_location", SqlType::Text),
    ("team_name_raw", SqlType::Text),
    ("weekday", SqlType::Text),
    ("away_team", SqlType::Text),
    ("away_score", SqlType::Integer),
    ("home_team", SqlType::Text),
    ("home_score", SqlType::Integer),
    ("location", SqlType::Text),
    ("result", SqlType::Integer),
    ("total", SqlType::Integer),
    ("overtime", SqlType::Boolean),
    ("old_game_id", SqlType::Text),
    ("nfl_detail_id", SqlType::Text),
    ("pfr_game_id", SqlType::Text),
    ("pff_game_id", SqlType::Text),
    ("espn_game_id", SqlType::Text),
    ("ftn_game_id", SqlType::Text),
    ("away_rest", SqlType::Integer),
    ("home_rest", SqlType::Integer),
    ("away_moneyline", SqlType::Integer),
    ("home_moneyline", SqlType::Integer),
    ("spread_line", SqlType::Real),
    ("away_spread_odds", SqlType::Integer),
    ("home_spread_odds", SqlType::Integer),
    ("total_line", SqlType::Real),
    ("under_odds", SqlType::Integer),
    ("over_odds", SqlType::Integer),
    ("div_game", SqlType::Boolean),
    ("roof", SqlType::Text),
    ("surface", SqlType::Text),
    ("temp", SqlType::Integer),
    ("wind", SqlType::Integer),
    ("away_qb_id", SqlType::Text),
    ("home_qb_id", SqlType::Text),
    ("away_qb_name", SqlType::Text),
    ("home_qb_name", SqlType::Text),
    ("away_coach", SqlType::Text),
    ("home_coach", SqlType::Text),
    ("referee", SqlType::Text),
    ("stadium_id", SqlType::Text),
    ("stadium", SqlType::Text),
    ("away_qb_epa", SqlType::Real),
    ("home_qb_epa", SqlType::Real),
    ("away_qb_qbr", SqlType::Real),
    ("home_qb_qbr", SqlType::Real),
    ("game_type", SqlType::Text),
    ("player_name", SqlType::Text),
    ("player_display_name", SqlType::Text),
    ("recent_team", SqlType::Text),
    ("practice_status", SqlType::Text),
    ("date_modified", SqlType::Timestamp),
    ("games", SqlType::Integer),
    ("fantasy_points_std", SqlType::Real),
    ("fantasy_points_half_ppr", SqlType::Real),
    ("fantasy_points_full_ppr", SqlType::Real),
    ("passing_interceptions", SqlType::Real),
    ("year", SqlType::Integer),
    ("before_preseason", SqlType::Boolean),
    ("rank", SqlType::Integer),
    ("avg_rank", SqlType::Real),
    ("stddev_rank", SqlType::Real),
    ("best_rank", SqlType::Integer),
    ("worst_rank", SqlType::Integer),
    ("adp", SqlType::Real),
    ("vs_adp", SqlType::Real),
    ("bye_week", SqlType::Integer),
    ("position_rank", SqlType::Integer),
    ("source_file", SqlType::Text),
];
