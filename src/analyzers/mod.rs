//! Aggregation over query-store records.
//!
//! This module assembles the member leaderboard from vote and roster
//! records, defines the recognized sort keys and their total order, and
//! ranks news mentions into the hot-news listing.

pub mod leaderboard;
pub mod news;
pub mod sort;
pub mod types;
