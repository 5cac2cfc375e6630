//! Season and week newtypes.

use crate::error::{NflError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First season with play-by-play coverage in the nflverse releases.
pub const FIRST_SEASON: u16 = 1999;
const LAST_SEASON: u16 = 2100;
pub const MAX_WEEK: u16 = 22;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = NflError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NflError::InvalidSeason {
            value: s.to_string(),
        };
        let year: u16 = s.trim().parse().map_err(|_| invalid())?;
        if !(FIRST_SEASON..=LAST_SEASON).contains(&year) {
            return Err(invalid());
        }
        Ok(Self(year))
    }
}

/// Type-safe wrapper for Week numbers (regular season plus playoffs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = NflError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NflError::InvalidWeek {
            value: s.to_string(),
        };
        let week: u16 = s.trim().parse().map_err(|_| invalid())?;
        if !(1..=MAX_WEEK).contains(&week) {
            return Err(invalid());
        }
        Ok(Self(week))
    }
}
