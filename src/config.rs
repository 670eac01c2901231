//! Process configuration, read from the environment once at startup.

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Everything the service needs to know, resolved in `main` and passed
/// down explicitly. Nothing below this layer reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint of the backing store.
    pub graphql_endpoint: String,
    /// Optional Hasura admin secret sent with every query.
    pub admin_secret: Option<String>,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// `start_year` of the council term whose roster is served.
    pub council_start_year: i32,
    /// Earliest meeting date included in the leaderboard aggregation.
    pub leaderboard_since: NaiveDate,
    /// Earliest meeting date included in single-member statistics.
    pub member_stats_since: NaiveDate,
    /// Earliest article date included in the hot-news ranking.
    pub hot_news_since: NaiveDate,
    /// Number of articles returned by the per-member news routes.
    pub member_news_limit: i64,
    /// Number of articles returned by the hot-news route.
    pub hot_news_limit: usize,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_date(name: &str, default: &str) -> Result<NaiveDate> {
    let raw = env_or(name, default);
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .with_context(|| format!("{name} is not a YYYY-MM-DD date: '{raw}'"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            graphql_endpoint: std::env::var("GRAPHQL_ENDPOINT")
                .context("GRAPHQL_ENDPOINT must be set")?,
            admin_secret: std::env::var("HASURA_ADMIN_SECRET").ok(),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8000"),
            council_start_year: env_or("COUNCIL_START_YEAR", "2016")
                .parse()
                .context("COUNCIL_START_YEAR is not a year")?,
            leaderboard_since: env_date("LEADERBOARD_SINCE", "2019-05-01")?,
            member_stats_since: env_date("MEMBER_STATS_SINCE", "2018-05-01")?,
            hot_news_since: env_date("HOT_NEWS_SINCE", "2019-12-01")?,
            member_news_limit: 20,
            hot_news_limit: 10,
        })
    }
}

impl Default for Config {
    /// The same values `from_env` falls back to, with a localhost
    /// endpoint. Mostly useful for tests running on a fake store.
    fn default() -> Self {
        Self {
            graphql_endpoint: "http://localhost:8080/v1/graphql".to_string(),
            admin_secret: None,
            bind_addr: "127.0.0.1:0".to_string(),
            council_start_year: 2016,
            leaderboard_since: NaiveDate::from_ymd_opt(2019, 5, 1).unwrap_or_default(),
            member_stats_since: NaiveDate::from_ymd_opt(2018, 5, 1).unwrap_or_default(),
            hot_news_since: NaiveDate::from_ymd_opt(2019, 12, 1).unwrap_or_default(),
            member_news_limit: 20,
            hot_news_limit: 10,
        }
    }
}
