use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::ir::ContributionDay;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContributionStats {
    pub total: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Totals and streaks over the dated records, with later records replacing
/// earlier ones for the same date. Undated records are ignored. A streak is a
/// run of consecutive calendar days with a non-zero count. The current streak
/// ends at `reference`; a reference day with no record at all is skipped so an
/// unfinished day does not reset it.
pub fn contribution_stats(
    series: &[ContributionDay],
    reference: Option<NaiveDate>,
) -> ContributionStats {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for day in series {
        if let Some(date) = day.date {
            by_date.insert(date, day.count);
        }
    }
    let total = by_date.values().map(|count| *count as u64).sum();

    ContributionStats {
        total,
        current_streak: reference.map_or(0, |reference| current_streak(&by_date, reference)),
        longest_streak: longest_streak(&by_date),
    }
}

fn current_streak(by_date: &BTreeMap<NaiveDate, u32>, reference: NaiveDate) -> u32 {
    let mut day = if by_date.contains_key(&reference) {
        Some(reference)
    } else {
        reference.checked_sub_days(Days::new(1))
    };
    let mut streak = 0;
    while let Some(date) = day {
        match by_date.get(&date) {
            Some(count) if *count > 0 => streak += 1,
            _ => break,
        }
        day = date.checked_sub_days(Days::new(1));
    }
    streak
}

fn longest_streak(by_date: &BTreeMap<NaiveDate, u32>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for (&date, &count) in by_date {
        if count == 0 {
            run = 0;
        } else {
            let adjacent = previous
                .and_then(|prev| prev.checked_add_days(Days::new(1)))
                .is_some_and(|next| next == date);
            run = if adjacent && run > 0 { run + 1 } else { 1 };
            longest = longest.max(run);
        }
        previous = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, count: u32) -> ContributionDay {
        ContributionDay::new(NaiveDate::from_ymd_opt(2024, 5, d).unwrap(), count)
    }

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, d)
    }

    #[test]
    fn empty_series() {
        assert_eq!(contribution_stats(&[], None), ContributionStats::default());
    }

    #[test]
    fn streaks_over_contiguous_days() {
        let series = [
            day(1, 2),
            day(2, 1),
            day(3, 0),
            day(4, 5),
            day(5, 1),
            day(6, 1),
            day(7, 0),
            day(8, 3),
        ];
        let stats = contribution_stats(&series, date(8));
        assert_eq!(stats.total, 13);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn inactive_reference_day_breaks_current_streak() {
        let series = [day(1, 2), day(2, 1), day(3, 0)];
        assert_eq!(contribution_stats(&series, date(3)).current_streak, 0);
    }

    #[test]
    fn missing_reference_day_is_tolerated() {
        let series = [day(1, 2), day(2, 1)];
        assert_eq!(contribution_stats(&series, date(3)).current_streak, 2);
    }

    #[test]
    fn gaps_split_runs() {
        let series = [day(1, 1), day(2, 1), day(5, 1), day(6, 1), day(7, 1)];
        assert_eq!(contribution_stats(&series, date(7)).longest_streak, 3);
    }

    #[test]
    fn undated_records_are_ignored() {
        let series = [ContributionDay { date: None, count: 9 }, day(1, 1)];
        let stats = contribution_stats(&series, date(1));
        assert_eq!(stats.total, 1);
        assert_eq!(stats.longest_streak, 1);
    }

    #[test]
    fn duplicate_dates_keep_last_record() {
        let series = [day(1, 2), day(1, 8)];
        let stats = contribution_stats(&series, date(1));
        assert_eq!(stats.total, 8);

        let cleared = [day(1, 5), day(2, 4), day(2, 0)];
        let stats = contribution_stats(&cleared, date(2));
        assert_eq!(stats.total, 5);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 1);
    }
}
