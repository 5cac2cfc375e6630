//! Type-safe wrappers for the values accepted on the command line.

pub mod data_type;
pub mod time;

pub use data_type::DataType;
pub use time::{Season, Week};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parsing() {
        assert_eq!("2023".parse::<Season>().unwrap(), Season::new(2023));
        assert!("1950".parse::<Season>().is_err());
        assert!("twenty".parse::<Season>().is_err());
    }

    #[test]
    fn test_week_parsing() {
        assert_eq!(" 7 ".parse::<Week>().unwrap().as_u16(), 7);
        assert!("0".parse::<Week>().is_err());
        assert!("23".parse::<Week>().is_err());
    }

    #[test]
    fn test_data_type_names() {
        assert_eq!("pbp".parse::<DataType>().unwrap(), DataType::PlayByPlay);
        assert_eq!(
            "weekly-stats".parse::<DataType>().unwrap(),
            DataType::WeeklyStats
        );
        assert_eq!(DataType::PlayByPlay.table_name(), "pbp_data");
        assert!("standings".parse::<DataType>().is_err());
    }

    #[test]
    fn test_reference_tables_are_not_season_scoped() {
        assert!(!DataType::Teams.is_season_scoped());
        assert!(!DataType::Players.is_season_scoped());
        assert!(DataType::Injuries.is_season_scoped());
        for data_type in DataType::SEASONAL {
            assert!(data_type.is_season_scoped());
        }
    }
}
