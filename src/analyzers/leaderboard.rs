//! Assembly and ordering of the member statistics leaderboard.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analyzers::sort::{SortKey, SortOrder};
use crate::analyzers::types::MemberStatistics;
use crate::parser::{Member, VoteRecord};
use crate::stats::{latest_rates, summarize_member};

/// Builds the leaderboard: every roster member, each carrying their most
/// recent period summary, ordered by `key`/`order`.
///
/// Members with no vote records get empty rate lists and are still
/// listed. The sort is stable, so equal keys keep roster order.
pub fn build_leaderboard(
    members: &[Member],
    votes: &[VoteRecord],
    key: SortKey,
    order: SortOrder,
) -> Vec<MemberStatistics> {
    let mut by_member: HashMap<i64, Vec<&VoteRecord>> = HashMap::new();
    for vote in votes {
        by_member.entry(vote.member_id).or_default().push(vote);
    }

    let mut entries: Vec<MemberStatistics> = members
        .iter()
        .map(|member| {
            let summaries = match by_member.get(&member.id) {
                Some(votes) => summarize_member(votes.iter().copied()),
                None => Default::default(),
            };
            MemberStatistics {
                member: member.clone(),
                rates: latest_rates(&summaries),
            }
        })
        .collect();

    sort_entries(&mut entries, key, order);
    entries
}

/// The `vote_count` (or `present_count`) of the single attached period.
/// `None` when the member has no vote records; `None` orders below any
/// populated value, so such members lead ascending output and trail
/// descending output.
fn rate_sort_value(entry: &MemberStatistics, key: SortKey) -> Option<u64> {
    match key {
        SortKey::VoteRate => entry
            .rates
            .vote_rate
            .first()
            .and_then(|period| period.values().next())
            .map(|counts| counts.vote_count),
        SortKey::AttendanceRate => entry
            .rates
            .attendance_rate
            .first()
            .and_then(|period| period.values().next())
            .map(|counts| counts.present_count),
        SortKey::Id | SortKey::NameZh => None,
    }
}

fn compare(a: &MemberStatistics, b: &MemberStatistics, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.member.id.cmp(&b.member.id),
        SortKey::NameZh => a.member.name_zh.cmp(&b.member.name_zh),
        SortKey::VoteRate | SortKey::AttendanceRate => {
            rate_sort_value(a, key).cmp(&rate_sort_value(b, key))
        }
    }
}

fn sort_entries(entries: &mut [MemberStatistics], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => entries.sort_by(|a, b| compare(a, b, key)),
        SortOrder::Desc => entries.sort_by(|a, b| compare(b, a, key)),
    }
}
