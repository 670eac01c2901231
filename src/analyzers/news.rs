//! Ranking of news mentions into the hot-news listing.

use std::collections::HashMap;

use serde::Serialize;

use crate::parser::{NewsItem, NewsMember, NewsMentionRow};

/// One deduplicated article with every member it mentions.
#[derive(Debug, Clone, Serialize)]
pub struct HotNewsEntry {
    #[serde(flatten)]
    pub news: NewsItem,
    pub engagement: i64,
    pub members: Vec<NewsMember>,
}

/// Collapses mention rows (one per article-member pair) into one entry
/// per article key, collecting the mentioned members, then returns the
/// `limit` most engaging articles.
///
/// Ordering is by engagement descending; ties keep first-seen article
/// order, matching the store's row order.
pub fn rank_hot_news(rows: Vec<NewsMentionRow>, limit: usize) -> Vec<HotNewsEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, HotNewsEntry> = HashMap::new();

    for row in rows {
        let key = row.news.key.clone();
        let entry = by_key.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            HotNewsEntry {
                news: row.news.clone(),
                engagement: row.engagement,
                members: Vec::new(),
            }
        });
        entry.members.push(row.member);
    }

    let mut entries: Vec<HotNewsEntry> = order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect();
    entries.sort_by(|a, b| b.engagement.cmp(&a.engagement));
    entries.truncate(limit);
    entries
}
