//! Typed read operations over the council data store.
//!
//! Each operation pairs a GraphQL document with the parsing and
//! aggregation that turns its `data` object into a response value.
//! User-supplied values are always bound as GraphQL variables, never
//! spliced into the document text.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use crate::analyzers::leaderboard::build_leaderboard;
use crate::analyzers::news::{HotNewsEntry, rank_hot_news};
use crate::analyzers::sort::{SortKey, SortOrder};
use crate::analyzers::types::MemberStatistics;
use crate::config::Config;
use crate::parser;
use crate::parser::{BudgetMeeting, NewsItem};
use crate::services::query_store::QueryStore;
use crate::stats::{all_period_rates, summarize_member};

const LEADERBOARD_QUERY: &str = r#"
query MemberLeaderboard($since: date!, $startYear: Int!) {
  legco_IndividualVote(
    where: {Meeting: {date: {_gte: $since}}}
    order_by: {Meeting: {date: asc}}
  ) {
    Meeting { id date }
    individual
    vote_number
    result
  }
  legco_Individual {
    id
    image
    name_ch
    name_en
    Party { name_short_ch }
  }
  legco_CouncilMembers(where: {Council: {start_year: {_eq: $startYear}}}) {
    member
    CouncilMembershipType { category sub_category }
  }
}
"#;

const MEMBER_QUERY: &str = r#"
query MemberStatistics($memberId: Int!, $since: date!, $startYear: Int!) {
  legco_IndividualVote(
    where: {individual: {_eq: $memberId}, Meeting: {date: {_gte: $since}}}
    order_by: {Meeting: {date: asc}}
  ) {
    Meeting { id date }
    individual
    vote_number
    result
  }
  legco_Individual(where: {id: {_eq: $memberId}}) {
    id
    image
    name_ch
    name_en
    Party { name_short_ch }
  }
  legco_CouncilMembers(
    where: {Individual: {id: {_eq: $memberId}}, Council: {start_year: {_eq: $startYear}}}
  ) {
    member
    CouncilMembershipType { category sub_category }
  }
}
"#;

const MEMBER_NEWS_QUERY: &str = r#"
query MemberNews($memberId: Int!, $limit: Int!) {
  legco_IndividualNews(
    where: {Individual: {id: {_eq: $memberId}}}
    order_by: {News: {date: desc}}
    limit: $limit
  ) {
    News { date image link title key }
  }
}
"#;

const MEMBER_NEWS_BY_NAME_QUERY: &str = r#"
query MemberNewsByName($name: String!, $limit: Int!) {
  legco_IndividualNews(
    where: {Individual: {name_ch: {_eq: $name}}}
    order_by: {News: {date: desc}}
    limit: $limit
  ) {
    News { date image link title key }
  }
}
"#;

const HOT_NEWS_QUERY: &str = r#"
query HotNews($since: date!) {
  legco_IndividualNews(where: {News: {date: {_gte: $since}}}, order_by: {news: asc}) {
    News { date image link title key }
    engagement { engagement }
    member: Individual { id name_ch image }
  }
}
"#;

const BUDGET_MEETING_QUERY: &str = r#"
query BudgetMeetings($year: Int!) {
  legco_BudgetQMeeting(where: {year: {_eq: $year}}) {
    id
    year
    bureau: bureau_name { id bureau name_ch name_en }
  }
}
"#;

fn date_var(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub struct LegcoService {
    store: Arc<dyn QueryStore>,
    cfg: Config,
}

impl LegcoService {
    pub fn new(store: Arc<dyn QueryStore>, cfg: Config) -> Self {
        Self { store, cfg }
    }

    /// Every roster member with their latest-month summary, sorted.
    pub async fn member_leaderboard(
        &self,
        key: SortKey,
        order: SortOrder,
    ) -> Result<Vec<MemberStatistics>> {
        let variables = json!({
            "since": date_var(self.cfg.leaderboard_since),
            "startYear": self.cfg.council_start_year,
        });
        let data = self.store.run_query(LEADERBOARD_QUERY, variables).await?;

        let votes = parser::parse_vote_records(&data)?;
        let members = parser::parse_members(&data)?;
        Ok(build_leaderboard(&members, &votes, key, order))
    }

    /// One member with their full per-month history, or `None` when the
    /// id has no roster entry for the configured term.
    pub async fn member_statistics(&self, member_id: i64) -> Result<Option<MemberStatistics>> {
        let variables = json!({
            "memberId": member_id,
            "since": date_var(self.cfg.member_stats_since),
            "startYear": self.cfg.council_start_year,
        });
        let data = self.store.run_query(MEMBER_QUERY, variables).await?;

        let Some(member) = parser::parse_members(&data)?.into_iter().next() else {
            return Ok(None);
        };
        let votes = parser::parse_vote_records(&data)?;
        let summaries = summarize_member(votes.iter().filter(|v| v.member_id == member.id));

        Ok(Some(MemberStatistics {
            member,
            rates: all_period_rates(&summaries),
        }))
    }

    /// The latest articles mentioning one member, newest first.
    pub async fn member_news(&self, member_id: i64) -> Result<Vec<NewsItem>> {
        let variables = json!({
            "memberId": member_id,
            "limit": self.cfg.member_news_limit,
        });
        let data = self.store.run_query(MEMBER_NEWS_QUERY, variables).await?;
        parser::parse_news_items(&data)
    }

    /// Same as [`member_news`](Self::member_news), selected by exact
    /// Chinese display name.
    pub async fn member_news_by_name(&self, name_zh: &str) -> Result<Vec<NewsItem>> {
        let variables = json!({
            "name": name_zh,
            "limit": self.cfg.member_news_limit,
        });
        let data = self
            .store
            .run_query(MEMBER_NEWS_BY_NAME_QUERY, variables)
            .await?;
        parser::parse_news_items(&data)
    }

    /// The most engaging recent articles, deduplicated by article key.
    pub async fn hot_news(&self) -> Result<Vec<HotNewsEntry>> {
        let variables = json!({"since": date_var(self.cfg.hot_news_since)});
        let data = self.store.run_query(HOT_NEWS_QUERY, variables).await?;
        let rows = parser::parse_news_mentions(&data)?;
        Ok(rank_hot_news(rows, self.cfg.hot_news_limit))
    }

    /// Budget-question meetings held in one year.
    pub async fn budget_meetings(&self, year: i32) -> Result<Vec<BudgetMeeting>> {
        let data = self
            .store
            .run_query(BUDGET_MEETING_QUERY, json!({"year": year}))
            .await?;
        parser::parse_budget_meetings(&data)
    }
}
