//! Decoding of GraphQL `data` objects into typed records.
//!
//! The query store returns one JSON object keyed by entity name. The
//! functions here pull out the arrays the service layer asked for and
//! turn them into owned records, merging the membership roster with the
//! identity table where a full member is needed.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One individual vote, as cast in one meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    pub member_id: i64,
    pub meeting_id: i64,
    pub meeting_date: NaiveDate,
    pub vote_number: Option<i64>,
    /// Raw result string; unrecognized values survive parsing but are
    /// excluded from every derived count.
    pub result: String,
}

/// A council member for one term: roster fields joined with identity
/// fields. Identity and party data may be missing; that never removes
/// the member from output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: i64,
    pub name_zh: Option<String>,
    pub name_en: Option<String>,
    pub avatar: Option<String>,
    pub political_affiliation: Option<String>,
    pub constituency_type: Option<String>,
    pub constituency_district: Option<String>,
}

/// One news article as stored upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub key: String,
}

/// The member identity attached to a news mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsMember {
    pub id: i64,
    pub name_ch: Option<String>,
    pub image: Option<String>,
}

/// One news-mention row: an article linked to one member, with the
/// article's engagement score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsMentionRow {
    pub news: NewsItem,
    pub engagement: i64,
    pub member: NewsMember,
}

/// A budget-question meeting and its answering bureau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMeeting {
    pub id: i64,
    pub year: i32,
    pub bureau: Option<BudgetBureau>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBureau {
    pub id: i64,
    pub bureau: Option<String>,
    pub name_ch: Option<String>,
    pub name_en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VoteRow {
    #[serde(rename = "Meeting")]
    meeting: MeetingRow,
    individual: i64,
    vote_number: Option<i64>,
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeetingRow {
    id: i64,
    date: String,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    member: i64,
    #[serde(rename = "CouncilMembershipType")]
    membership_type: Option<MembershipTypeRow>,
}

#[derive(Debug, Deserialize)]
struct MembershipTypeRow {
    category: Option<String>,
    sub_category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdentityRow {
    id: i64,
    name_ch: Option<String>,
    name_en: Option<String>,
    image: Option<String>,
    #[serde(rename = "Party")]
    party: Option<PartyRow>,
}

#[derive(Debug, Deserialize)]
struct PartyRow {
    name_short_ch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsRow {
    #[serde(rename = "News")]
    news: NewsItem,
}

#[derive(Debug, Deserialize)]
struct NewsMentionRaw {
    #[serde(rename = "News")]
    news: NewsItem,
    engagement: Option<EngagementRow>,
    member: NewsMember,
}

#[derive(Debug, Deserialize)]
struct EngagementRow {
    engagement: Option<i64>,
}

fn entity_rows<T>(data: &Value, entity: &str) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let rows = match data.get(entity) {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(rows) => rows.clone(),
    };
    serde_json::from_value(rows).with_context(|| format!("unexpected shape for {entity}"))
}

/// Parses a meeting date, accepting both plain dates and timestamps by
/// reading only the leading `YYYY-MM-DD`.
fn parse_meeting_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Extracts `legco_IndividualVote` rows. Rows with an unparseable meeting
/// date are skipped with a warning; a missing result becomes the empty
/// string so the summaries ignore it.
pub fn parse_vote_records(data: &Value) -> Result<Vec<VoteRecord>> {
    let rows: Vec<VoteRow> = entity_rows(data, "legco_IndividualVote")?;

    let votes = rows
        .into_iter()
        .filter_map(|row| match parse_meeting_date(&row.meeting.date) {
            Some(meeting_date) => Some(VoteRecord {
                member_id: row.individual,
                meeting_id: row.meeting.id,
                meeting_date,
                vote_number: row.vote_number,
                result: row.result.unwrap_or_default(),
            }),
            None => {
                warn!(meeting = row.meeting.id, date = %row.meeting.date, "skipping vote with unparseable meeting date");
                None
            }
        })
        .collect();

    Ok(votes)
}

/// Merges `legco_CouncilMembers` roster rows with `legco_Individual`
/// identity rows into [`Member`] values, preserving roster order.
///
/// The roster decides who appears: an identity row without a roster row
/// is dropped, while a roster row without an identity row keeps null
/// identity fields.
pub fn parse_members(data: &Value) -> Result<Vec<Member>> {
    let roster: Vec<RosterRow> = entity_rows(data, "legco_CouncilMembers")?;
    let identities: Vec<IdentityRow> = entity_rows(data, "legco_Individual")?;

    let by_id: HashMap<i64, IdentityRow> =
        identities.into_iter().map(|row| (row.id, row)).collect();

    let members = roster
        .into_iter()
        .map(|row| {
            let identity = by_id.get(&row.member);
            let (constituency_type, constituency_district) = match row.membership_type {
                Some(m) => (m.category, m.sub_category),
                None => (None, None),
            };
            Member {
                id: row.member,
                name_zh: identity.and_then(|i| i.name_ch.clone()),
                name_en: identity.and_then(|i| i.name_en.clone()),
                avatar: identity.and_then(|i| i.image.clone()),
                political_affiliation: identity
                    .and_then(|i| i.party.as_ref())
                    .and_then(|p| p.name_short_ch.clone()),
                constituency_type,
                constituency_district,
            }
        })
        .collect();

    Ok(members)
}

/// Extracts the bare articles from `legco_IndividualNews` rows.
pub fn parse_news_items(data: &Value) -> Result<Vec<NewsItem>> {
    let rows: Vec<NewsRow> = entity_rows(data, "legco_IndividualNews")?;
    Ok(rows.into_iter().map(|row| row.news).collect())
}

/// Extracts full news-mention rows (article, engagement, member) from
/// `legco_IndividualNews`. A missing engagement relation counts as zero.
pub fn parse_news_mentions(data: &Value) -> Result<Vec<NewsMentionRow>> {
    let rows: Vec<NewsMentionRaw> = entity_rows(data, "legco_IndividualNews")?;

    Ok(rows
        .into_iter()
        .map(|row| NewsMentionRow {
            news: row.news,
            engagement: row.engagement.and_then(|e| e.engagement).unwrap_or(0),
            member: row.member,
        })
        .collect())
}

/// Extracts `legco_BudgetQMeeting` rows.
pub fn parse_budget_meetings(data: &Value) -> Result<Vec<BudgetMeeting>> {
    entity_rows(data, "legco_BudgetQMeeting")
}
