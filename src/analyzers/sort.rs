//! Recognized leaderboard sort keys and orders.
//!
//! Parsing lives at the boundary: handlers turn raw path segments into
//! these enums and answer invalid input themselves, so the leaderboard
//! code only ever sees validated values.

use std::fmt;
use std::str::FromStr;

/// Raised when a request carries an unrecognized sort key or order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    NameZh,
    VoteRate,
    AttendanceRate,
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "name_zh" => Ok(SortKey::NameZh),
            "vote_rate" => Ok(SortKey::VoteRate),
            "attendance_rate" => Ok(SortKey::AttendanceRate),
            other => Err(ValidationError(format!("unknown sort key '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ValidationError(format!("unknown sort order '{other}'"))),
        }
    }
}
