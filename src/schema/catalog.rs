//! Per-entity knowledge: natural keys, index sets, the full column list used
//! when no sample rows are available, and upstream column aliases.

use crate::cli::types::DataType;

/// Natural unique key of an entity. Empty means no declared primary key.
pub fn natural_key(data_type: DataType) -> &'static [&'static str] {
    match data_type {
        DataType::Teams => &["team_abbr"],
        // gsis_id can be NULL for older players
        DataType::Players => &[],
        DataType::Schedules => &["game_id"],
        DataType::PlayByPlay => &["game_id", "play_id"],
        DataType::WeeklyStats => &["player_id", "season", "week", "season_type"],
        DataType::SeasonalStats => &["player_id", "season", "season_type"],
        DataType::Rosters => &["player_id", "season", "week", "team"],
        DataType::Injuries => &["player_id", "season", "week", "report_date"],
    }
}

/// Secondary indexes as `(suffix, columns)`; the index is named
/// `idx_<table>_<suffix>`.
pub fn index_columns(data_type: DataType) -> &'static [(&'static str, &'static [&'static str])] {
    match data_type {
        DataType::Teams => &[("conf_div", &["team_conf", "team_division"])],
        DataType::Players => &[
            ("position", &["position"]),
            ("team", &["team"]),
            ("status", &["status"]),
            ("college", &["college"]),
            ("draft_year", &["entry_year"]),
        ],
        DataType::Schedules => &[
            ("season_week", &["season", "week"]),
            ("game_date", &["gameday"]),
            ("teams", &["home_team", "away_team"]),
            ("season_type", &["game_type"]),
        ],
        DataType::PlayByPlay => &[
            ("game_id", &["game_id"]),
            ("season_week", &["season", "week"]),
            ("season_type", &["season_type"]),
            ("posteam", &["posteam"]),
            ("defteam", &["defteam"]),
            ("play_type", &["play_type"]),
            ("down", &["down"]),
            ("quarter", &["qtr"]),
            ("game_date", &["game_date"]),
        ],
        DataType::WeeklyStats => &[
            ("player_season", &["player_id", "season", "week"]),
            ("season_type", &["season_type"]),
            ("position", &["position"]),
            ("team", &["recent_team"]),
            ("opponent", &["opponent_team"]),
            ("fantasy_points", &["fantasy_points"]),
        ],
        DataType::SeasonalStats => &[
            ("player_season", &["player_id", "season"]),
            ("season_type", &["season_type"]),
            ("position", &["position"]),
            ("team", &["recent_team"]),
            ("fantasy_points", &["fantasy_points"]),
        ],
        DataType::Rosters => &[
            ("player_season", &["player_id", "season", "week"]),
            ("team", &["team"]),
            ("position", &["position"]),
            ("status", &["status"]),
        ],
        DataType::Injuries => &[
            ("player_season", &["player_id", "season", "week"]),
            ("report_date", &["report_date"]),
            ("status", &["report_status"]),
        ],
    }
}

/// Upstream column names that are loaded under a different name, applied
/// only when the target column is not already present.
pub fn column_aliases(data_type: DataType) -> &'static [(&'static str, &'static str)] {
    match data_type {
        DataType::Rosters | DataType::Injuries => {
            &[("gsis_id", "player_id"), ("full_name", "player_name")]
        }
        DataType::WeeklyStats | DataType::SeasonalStats => &[("team", "recent_team")],
        _ => &[],
    }
}

/// Full column list of an entity, used to create its table before any data
/// has been seen.
pub fn known_columns(data_type: DataType) -> &'static [&'static str] {
    match data_type {
        DataType::Teams => TEAM_COLUMNS,
        DataType::Players => PLAYER_COLUMNS,
        DataType::Schedules => SCHEDULE_COLUMNS,
        DataType::PlayByPlay => PBP_COLUMNS,
        DataType::WeeklyStats => WEEKLY_COLUMNS,
        DataType::SeasonalStats => SEASONAL_COLUMNS,
        DataType::Rosters => ROSTER_COLUMNS,
        DataType::Injuries => INJURY_COLUMNS,
    }
}

/// Stat columns summed when weekly lines are rolled up into a season.
pub const SUMMED_STAT_COLUMNS: &[&str] = &[
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
    "rushing_fumbles",
    "rushing_fumbles_lost",
    "rushing_first_downs",
    "rushing_epa",
    "rushing_2pt_conversions",
    "receptions",
    "targets",
    "receiving_yards",
    "receiving_tds",
    "receiving_fumbles",
    "receiving_fumbles_lost",
    "receiving_air_yards",
    "receiving_yards_after_catch",
    "receiving_first_downs",
    "receiving_epa",
    "receiving_2pt_conversions",
    "special_teams_tds",
    "fantasy_points",
    "fantasy_points_ppr",
];

/// Rate columns averaged over games when rolling up a season.
pub const AVERAGED_STAT_COLUMNS: &[&str] = &[
    "pacr",
    "dakota",
    "racr",
    "target_share",
    "air_yards_share",
    "wopr",
];

/// Identity columns carried over from a player's latest week.
pub const SEASONAL_IDENTITY_COLUMNS: &[&str] = &[
    "player_id",
    "player_name",
    "player_display_name",
    "position",
    "position_group",
    "headshot_url",
    "recent_team",
];

const TEAM_COLUMNS: &[&str] = &[
    "team_abbr",
    "team_name",
    "team_id",
    "team_nick",
    "team_conf",
    "team_division",
    "team_color",
    "team_color2",
    "team_color3",
    "team_color4",
    "team_logo_wikipedia",
    "team_logo_espn",
    "team_wordmark",
];

const PLAYER_COLUMNS: &[&str] = &[
    "gsis_id",
    "status",
    "display_name",
    "first_name",
    "last_name",
    "esb_id",
    "birth_date",
    "college",
    "position_group",
    "position",
    "jersey_number",
    "height",
    "weight",
    "team",
    "years_exp",
    "entry_year",
    "rookie_year",
    "draft_club",
    "draft_number",
    "headshot_url",
    "pfr_id",
    "pff_id",
    "espn_id",
    "smart_id",
];

const SCHEDULE_COLUMNS: &[&str] = &[
    "game_id",
    "season",
    "game_type",
    "week",
    "gameday",
    "weekday",
    "gametime",
    "away_team",
    "away_score",
    "home_team",
    "home_score",
    "location",
    "result",
    "total",
    "overtime",
    "old_game_id",
    "gsis",
    "nfl_detail_id",
    "pfr_game_id",
    "pff_game_id",
    "espn_game_id",
    "ftn_game_id",
    "away_rest",
    "home_rest",
    "away_moneyline",
    "home_moneyline",
    "spread_line",
    "away_spread_odds",
    "home_spread_odds",
    "total_line",
    "under_odds",
    "over_odds",
    "div_game",
    "roof",
    "surface",
    "temp",
    "wind",
    "away_qb_id",
    "home_qb_id",
    "away_qb_name",
    "home_qb_name",
    "away_coach",
    "home_coach",
    "referee",
    "stadium_id",
    "stadium",
];

const PBP_COLUMNS: &[&str] = &[
    "play_id",
    "game_id",
    "old_game_id",
    "home_team",
    "away_team",
    "season_type",
    "week",
    "posteam",
    "posteam_type",
    "defteam",
    "side_of_field",
    "yardline_100",
    "game_date",
    "quarter_seconds_remaining",
    "half_seconds_remaining",
    "game_seconds_remaining",
    "game_half",
    "quarter_end",
    "drive",
    "sp",
    "qtr",
    "down",
    "goal_to_go",
    "game_time",
    "yrdln",
    "ydstogo",
    "ydsnet",
    "play_description",
    "play_type",
    "yards_gained",
    "shotgun",
    "no_huddle",
    "qb_dropback",
    "qb_kneel",
    "qb_spike",
    "qb_scramble",
    "pass_length",
    "pass_location",
    "air_yards",
    "yards_after_catch",
    "run_location",
    "run_gap",
    "field_goal_result",
    "kick_distance",
    "extra_point_result",
    "two_point_conv_result",
    "home_timeouts_remaining",
    "away_timeouts_remaining",
    "timeout",
    "timeout_team",
    "td_team",
    "td_player_name",
    "td_player_id",
    "posteam_timeouts_remaining",
    "defteam_timeouts_remaining",
    "total_home_score",
    "total_away_score",
    "posteam_score",
    "defteam_score",
    "score_differential",
    "posteam_score_post",
    "defteam_score_post",
    "score_differential_post",
    "no_score_prob",
    "opp_fg_prob",
    "opp_safety_prob",
    "opp_td_prob",
    "fg_prob",
    "safety_prob",
    "td_prob",
    "extra_point_prob",
    "two_point_conversion_prob",
    "ep",
    "epa",
    "air_epa",
    "yac_epa",
    "comp_air_epa",
    "comp_yac_epa",
    "wp",
    "def_wp",
    "home_wp",
    "away_wp",
    "wpa",
    "vegas_wpa",
    "vegas_home_wpa",
    "home_wp_post",
    "away_wp_post",
    "vegas_wp",
    "vegas_home_wp",
    "first_down_rush",
    "first_down_pass",
    "first_down_penalty",
    "third_down_converted",
    "third_down_failed",
    "fourth_down_converted",
    "fourth_down_failed",
    "incomplete_pass",
    "touchback",
    "interception",
    "punt_blocked",
    "fumble",
    "complete_pass",
    "passer_player_id",
    "passer_player_name",
    "receiver_player_id",
    "receiver_player_name",
    "rusher_player_id",
    "rusher_player_name",
    "interception_player_id",
    "interception_player_name",
    "kicker_player_id",
    "kicker_player_name",
    "punter_player_id",
    "punter_player_name",
    "return_yards",
    "penalty_yards",
    "penalty_type",
    "penalty_player_id",
    "penalty_player_name",
    "replay_or_challenge",
    "replay_or_challenge_result",
    "season",
    "cpoe",
    "series",
    "series_success",
    "series_result",
    "play_order",
    "play_type_nfl",
    "drive_play_count",
    "drive_time_of_possession",
    "drive_first_downs",
    "drive_inside20",
    "drive_ended_with_score",
    "drive_start_yard_line",
    "drive_end_yard_line",
    "fixed_drive",
    "fixed_drive_result",
    "fantasy_player_name",
    "fantasy_player_id",
    "fantasy_position",
];

const WEEKLY_COLUMNS: &[&str] = &[
    "player_id",
    "player_name",
    "player_display_name",
    "position",
    "position_group",
    "headshot_url",
    "recent_team",
    "season",
    "week",
    "season_type",
    "opponent_team",
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
    "pacr",
    "dakota",
    "carries",
    "rushing_yards",
    "rushing_tds",
    "rushing_fumbles",
    "rushing_fumbles_lost",
    "rushing_first_downs",
    "rushing_epa",
    "rushing_2pt_conversions",
    "receptions",
    "targets",
    "receiving_yards",
    "receiving_tds",
    "receiving_fumbles",
    "receiving_fumbles_lost",
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
    "fantasy_points",
    "fantasy_points_ppr",
    "fantasy_points_std",
    "fantasy_points_half_ppr",
    "fantasy_points_full_ppr",
];

const SEASONAL_COLUMNS: &[&str] = &[
    "player_id",
    "player_name",
    "player_display_name",
    "position",
    "position_group",
    "headshot_url",
    "recent_team",
    "season",
    "season_type",
    "games",
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
    "rushing_fumbles",
    "rushing_fumbles_lost",
    "rushing_first_downs",
    "rushing_epa",
    "rushing_2pt_conversions",
    "receptions",
    "targets",
    "receiving_yards",
    "receiving_tds",
    "receiving_fumbles",
    "receiving_fumbles_lost",
    "receiving_air_yards",
    "receiving_yards_after_catch",
    "receiving_first_downs",
    "receiving_epa",
    "receiving_2pt_conversions",
    "special_teams_tds",
    "fantasy_points",
    "fantasy_points_ppr",
    "pacr",
    "dakota",
    "racr",
    "target_share",
    "air_yards_share",
    "wopr",
    "fantasy_points_std",
    "fantasy_points_half_ppr",
    "fantasy_points_full_ppr",
];

const ROSTER_COLUMNS: &[&str] = &[
    "season",
    "team",
    "position",
    "depth_chart_position",
    "jersey_number",
    "status",
    "player_name",
    "first_name",
    "last_name",
    "birth_date",
    "height",
    "weight",
    "college",
    "player_id",
    "espn_id",
    "sportradar_id",
    "yahoo_id",
    "rotowire_id",
    "pff_id",
    "pfr_id",
    "fantasy_data_id",
    "sleeper_id",
    "years_exp",
    "headshot_url",
    "ngs_position",
    "week",
    "game_type",
    "status_description_abbr",
    "football_name",
    "esb_id",
    "gsis_it_id",
    "smart_id",
    "entry_year",
    "rookie_year",
    "draft_club",
    "draft_number",
];

const INJURY_COLUMNS: &[&str] = &[
    "season",
    "game_type",
    "team",
    "week",
    "player_id",
    "position",
    "player_name",
    "first_name",
    "last_name",
    "report_primary_injury",
    "report_secondary_injury",
    "report_status",
    "practice_primary_injury",
    "practice_secondary_injury",
    "practice_status",
    "date_modified",
];
