//! The entity types that can be extracted and the tables they land in.

use crate::error::{NflError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    Teams,
    Players,
    Schedules,
    PlayByPlay,
    WeeklyStats,
    SeasonalStats,
    Rosters,
    Injuries,
}

impl DataType {
    pub const ALL: [DataType; 8] = [
        DataType::Teams,
        DataType::Players,
        DataType::Schedules,
        DataType::PlayByPlay,
        DataType::WeeklyStats,
        DataType::SeasonalStats,
        DataType::Rosters,
        DataType::Injuries,
    ];

    /// Reference tables are replaced wholesale rather than per season.
    pub const REFERENCE: [DataType; 2] = [DataType::Teams, DataType::Players];

    /// Season-scoped entities in extraction order.
    pub const SEASONAL: [DataType; 6] = [
        DataType::Schedules,
        DataType::PlayByPlay,
        DataType::WeeklyStats,
        DataType::SeasonalStats,
        DataType::Rosters,
        DataType::Injuries,
    ];

    /// What `refresh-season` reloads when no data types are given.
    pub const DEFAULT_REFRESH: [DataType; 5] = [
        DataType::PlayByPlay,
        DataType::WeeklyStats,
        DataType::SeasonalStats,
        DataType::Rosters,
        DataType::Injuries,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            DataType::Teams => "teams",
            DataType::Players => "players",
            DataType::Schedules => "schedules",
            DataType::PlayByPlay => "pbp_data",
            DataType::WeeklyStats => "weekly_stats",
            DataType::SeasonalStats => "seasonal_stats",
            DataType::Rosters => "rosters",
            DataType::Injuries => "injuries",
        }
    }

    pub fn is_season_scoped(&self) -> bool {
        !Self::REFERENCE.contains(self)
    }

    /// Weekly and seasonal stat lines carry fantasy point columns.
    pub fn has_fantasy_points(&self) -> bool {
        matches!(self, DataType::WeeklyStats | DataType::SeasonalStats)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for DataType {
    type Err = NflError;

    /// Accepts table names and the short names used on the command line.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "teams" => Ok(DataType::Teams),
            "players" => Ok(DataType::Players),
            "schedules" => Ok(DataType::Schedules),
            "pbp" | "pbp_data" => Ok(DataType::PlayByPlay),
            "weekly" | "weekly_stats" => Ok(DataType::WeeklyStats),
            "seasonal" | "seasonal_stats" => Ok(DataType::SeasonalStats),
            "rosters" => Ok(DataType::Rosters),
            "injuries" => Ok(DataType::Injuries),
            _ => Err(NflError::UnknownDataType {
                value: s.to_string(),
            }),
        }
    }
}
