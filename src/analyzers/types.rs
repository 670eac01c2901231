//! Output types produced by the aggregation pipeline.

use serde::Serialize;

use crate::parser::Member;
use crate::stats::RateSeries;

/// A member joined with their aggregated vote and attendance rates.
///
/// Serves both the leaderboard view (rates hold the single most recent
/// period) and the single-member view (rates hold every period). Members
/// with no vote records carry two empty lists.
#[derive(Debug, Clone, Serialize)]
pub struct MemberStatistics {
    #[serde(flatten)]
    pub member: Member,
    #[serde(flatten)]
    pub rates: RateSeries,
}
