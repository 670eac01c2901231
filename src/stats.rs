//! Per-member vote and attendance summaries, bucketed by calendar month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::parser::VoteRecord;

/// Render format for period keys, e.g. `2020-02-01 00:00:00`.
pub const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The five vote outcomes recorded by the council. Anything else in the
/// store's `result` column is ignored by the summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Yes,
    No,
    Abstain,
    Present,
    Absent,
}

impl VoteOutcome {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "YES" => Some(VoteOutcome::Yes),
            "NO" => Some(VoteOutcome::No),
            "ABSTAIN" => Some(VoteOutcome::Abstain),
            "PRESENT" => Some(VoteOutcome::Present),
            "ABSENT" => Some(VoteOutcome::Absent),
            _ => None,
        }
    }
}

/// Raw outcome tallies for one (member, month) bucket.
#[derive(Debug, Default, Clone, Copy)]
struct OutcomeCounts {
    yes: u64,
    no: u64,
    abstain: u64,
    present: u64,
    absent: u64,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: VoteOutcome) {
        match outcome {
            VoteOutcome::Yes => self.yes += 1,
            VoteOutcome::No => self.no += 1,
            VoteOutcome::Abstain => self.abstain += 1,
            VoteOutcome::Present => self.present += 1,
            VoteOutcome::Absent => self.absent += 1,
        }
    }

    fn summary(&self) -> PeriodSummary {
        PeriodSummary {
            vote_count: self.yes + self.no + self.present,
            no_vote_count: self.abstain + self.absent,
            present_count: self.yes + self.no + self.present + self.abstain,
            absent_count: self.absent,
        }
    }
}

/// Derived counts for one month bucket.
///
/// ABSTAIN is counted as present but also as a non-vote, so for every
/// period `vote_count + no_vote_count == present_count + absent_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub vote_count: u64,
    pub no_vote_count: u64,
    pub present_count: u64,
    pub absent_count: u64,
}

impl PeriodSummary {
    pub fn vote_rate(&self) -> VoteRateCounts {
        VoteRateCounts {
            vote_count: self.vote_count,
            no_vote_count: self.no_vote_count,
        }
    }

    pub fn attendance(&self) -> AttendanceCounts {
        AttendanceCounts {
            present_count: self.present_count,
            absent_count: self.absent_count,
        }
    }
}

/// The `vote_rate` half of a period summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteRateCounts {
    pub vote_count: u64,
    pub no_vote_count: u64,
}

/// The `attendance_rate` half of a period summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceCounts {
    pub present_count: u64,
    pub absent_count: u64,
}

/// Truncates a meeting date to the first day of its month at midnight.
pub fn period_key(date: NaiveDate) -> NaiveDateTime {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    first.and_time(NaiveTime::MIN)
}

/// Renders a period key in the wire format used by the JSON responses.
pub fn format_period(period: NaiveDateTime) -> String {
    period.format(PERIOD_FORMAT).to_string()
}

/// Summarizes one member's votes into one [`PeriodSummary`] per month.
///
/// Input order does not matter and the input may be empty. Records whose
/// `result` string is not one of the five recognized outcomes contribute
/// to no count at all.
pub fn summarize_member<'a, I>(votes: I) -> BTreeMap<NaiveDateTime, PeriodSummary>
where
    I: IntoIterator<Item = &'a VoteRecord>,
{
    let mut counts: BTreeMap<NaiveDateTime, OutcomeCounts> = BTreeMap::new();

    for vote in votes {
        if let Some(outcome) = VoteOutcome::parse(&vote.result) {
            counts
                .entry(period_key(vote.meeting_date))
                .or_default()
                .record(outcome);
        }
    }

    counts.into_iter().map(|(d, c)| (d, c.summary())).collect()
}

/// The two response shapes carried by every member statistics payload.
/// Each element is a one-key map from a rendered period to its counts.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RateSeries {
    pub vote_rate: Vec<BTreeMap<String, VoteRateCounts>>,
    pub attendance_rate: Vec<BTreeMap<String, AttendanceCounts>>,
}

fn rate_entry(period: NaiveDateTime, summary: &PeriodSummary) -> BTreeMap<String, VoteRateCounts> {
    BTreeMap::from([(format_period(period), summary.vote_rate())])
}

fn attendance_entry(
    period: NaiveDateTime,
    summary: &PeriodSummary,
) -> BTreeMap<String, AttendanceCounts> {
    BTreeMap::from([(format_period(period), summary.attendance())])
}

/// Shapes only the most recent period for the leaderboard view.
///
/// An empty summary map yields two empty lists, never a zeroed summary.
pub fn latest_rates(summaries: &BTreeMap<NaiveDateTime, PeriodSummary>) -> RateSeries {
    match summaries.last_key_value() {
        None => RateSeries::default(),
        Some((&period, summary)) => RateSeries {
            vote_rate: vec![rate_entry(period, summary)],
            attendance_rate: vec![attendance_entry(period, summary)],
        },
    }
}

/// Shapes every period, ascending, for the single-member view.
pub fn all_period_rates(summaries: &BTreeMap<NaiveDateTime, PeriodSummary>) -> RateSeries {
    RateSeries {
        vote_rate: summaries
            .iter()
            .map(|(&period, summary)| rate_entry(period, summary))
            .collect(),
        attendance_rate: summaries
            .iter()
            .map(|(&period, summary)| attendance_entry(period, summary))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(member_id: i64, date: &str, result: &str) -> VoteRecord {
        VoteRecord {
            member_id,
            meeting_id: 1,
            meeting_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            vote_number: Some(1),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_period_key_truncates_to_month_start() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        assert_eq!(format_period(period_key(d)), "2020-01-01 00:00:00");
    }

    #[test]
    fn test_summarize_empty_input() {
        let votes: Vec<VoteRecord> = Vec::new();
        assert!(summarize_member(&votes).is_empty());
    }

    #[test]
    fn test_latest_rates_of_empty_map() {
        let rates = latest_rates(&BTreeMap::new());
        assert!(rates.vote_rate.is_empty());
        assert!(rates.attendance_rate.is_empty());
    }

    #[test]
    fn test_summarize_two_months() {
        let votes = vec![
            vote(1, "2020-01-15", "YES"),
            vote(1, "2020-01-20", "ABSENT"),
            vote(1, "2020-02-01", "NO"),
        ];
        let summaries = summarize_member(&votes);
        assert_eq!(summaries.len(), 2);

        let jan = period_key(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        let feb = period_key(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
        assert_eq!(
            summaries[&jan],
            PeriodSummary {
                vote_count: 1,
                no_vote_count: 1,
                present_count: 1,
                absent_count: 1,
            }
        );
        assert_eq!(
            summaries[&feb],
            PeriodSummary {
                vote_count: 1,
                no_vote_count: 0,
                present_count: 1,
                absent_count: 0,
            }
        );
    }

    #[test]
    fn test_latest_rates_selects_most_recent_month_only() {
        let votes = vec![
            vote(1, "2019-11-05", "YES"),
            vote(1, "2019-12-12", "NO"),
            vote(1, "2020-01-09", "ABSTAIN"),
        ];
        let rates = latest_rates(&summarize_member(&votes));
        assert_eq!(rates.vote_rate.len(), 1);
        assert_eq!(rates.attendance_rate.len(), 1);

        let entry = &rates.vote_rate[0];
        assert!(entry.contains_key("2020-01-01 00:00:00"));
        let counts = &entry["2020-01-01 00:00:00"];
        assert_eq!(counts.vote_count, 0);
        assert_eq!(counts.no_vote_count, 1);
    }

    #[test]
    fn test_counts_balance_per_period() {
        let results = ["YES", "NO", "ABSTAIN", "PRESENT", "ABSENT", "YES", "ABSTAIN"];
        let votes: Vec<VoteRecord> = results
            .iter()
            .enumerate()
            .map(|(i, r)| vote(1, &format!("2020-0{}-10", (i % 3) + 1), r))
            .collect();

        for summary in summarize_member(&votes).values() {
            assert_eq!(
                summary.vote_count + summary.no_vote_count,
                summary.present_count + summary.absent_count
            );
        }
    }

    #[test]
    fn test_unrecognized_result_is_ignored() {
        let votes = vec![vote(1, "2020-01-15", "TELLER"), vote(1, "2020-01-16", "YES")];
        let summaries = summarize_member(&votes);
        let jan = period_key(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(summaries[&jan].vote_count, 1);
        assert_eq!(summaries[&jan].no_vote_count, 0);
        assert_eq!(summaries[&jan].present_count, 1);
    }

    #[test]
    fn test_all_period_rates_ascending() {
        let votes = vec![vote(1, "2020-02-03", "YES"), vote(1, "2020-01-15", "NO")];
        let rates = all_period_rates(&summarize_member(&votes));
        assert_eq!(rates.vote_rate.len(), 2);
        assert!(rates.vote_rate[0].contains_key("2020-01-01 00:00:00"));
        assert!(rates.vote_rate[1].contains_key("2020-02-01 00:00:00"));
    }
}
