use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Utc};
use tracing::debug;

use crate::error::{RenderResult, check_dimensions};
use crate::ir::{Cell, ContributionDay, WeekGrid};

/// Source of "today" used to clamp reference dates that lie in the future.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Column count used when the caller does not pin one: a full 53-week year
/// once the series covers at least 371 days.
pub fn auto_cols(series_len: usize) -> usize {
    if series_len >= 371 { 53 } else { 52 }
}

/// Latest dated record, clamped so it never passes `today`.
pub fn reference_date(series: &[ContributionDay], today: NaiveDate) -> Option<NaiveDate> {
    let latest = series.iter().filter_map(|day| day.date).max()?;
    Some(latest.min(today))
}

pub fn normalize_contributions(
    series: &[ContributionDay],
    precomputed_weeks: Option<&[Vec<ContributionDay>]>,
    cols: usize,
    rows: usize,
    clock: &dyn Clock,
) -> RenderResult<(WeekGrid, Option<NaiveDate>)> {
    check_dimensions(cols, rows)?;
    let reference = reference_date(series, clock.today());

    let weeks = match precomputed_weeks {
        Some(weeks) if !weeks.is_empty() => regroup_weeks(weeks, cols, rows),
        _ => weeks_from_dates(series, reference, cols, rows),
    };

    let grid = mark_future(weeks, reference, cols, rows);
    debug!(
        records = series.len(),
        undated = series.iter().filter(|day| day.date.is_none()).count(),
        reference = ?reference,
        cols,
        rows,
        "normalized contribution calendar"
    );
    Ok((grid, reference))
}

/// Keeps the newest `cols` weeks, each cut or padded to `rows` days, and
/// left-pads with empty weeks so the newest data stays right-aligned.
fn regroup_weeks(
    weeks: &[Vec<ContributionDay>],
    cols: usize,
    rows: usize,
) -> Vec<Vec<ContributionDay>> {
    let newest = &weeks[weeks.len().saturating_sub(cols)..];
    let missing = cols - newest.len();
    let mut out = vec![vec![ContributionDay::empty(); rows]; missing];
    for week in newest {
        let mut days: Vec<ContributionDay> = week.iter().take(rows).copied().collect();
        days.resize(rows, ContributionDay::empty());
        out.push(days);
    }
    out
}

fn weeks_from_dates(
    series: &[ContributionDay],
    reference: Option<NaiveDate>,
    cols: usize,
    rows: usize,
) -> Vec<Vec<ContributionDay>> {
    let Some(reference) = reference else {
        return vec![vec![ContributionDay::empty(); rows]; cols];
    };

    // Later records for the same date replace earlier ones.
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for day in series {
        if let Some(date) = day.date {
            counts.insert(date, day.count);
        }
    }

    let to_sunday = reference.weekday().num_days_from_sunday() as u64;
    let first_sunday = reference
        .checked_sub_days(Days::new(to_sunday))
        .and_then(|sunday| sunday.checked_sub_days(Days::new((cols as u64 - 1) * 7)));

    (0..cols)
        .map(|col| {
            (0..rows)
                .map(|row| {
                    let offset = (col * 7 + row) as u64;
                    match first_sunday.and_then(|start| start.checked_add_days(Days::new(offset))) {
                        Some(date) => {
                            ContributionDay::new(date, counts.get(&date).copied().unwrap_or(0))
                        }
                        None => ContributionDay::empty(),
                    }
                })
                .collect()
        })
        .collect()
}

fn mark_future(
    weeks: Vec<Vec<ContributionDay>>,
    reference: Option<NaiveDate>,
    cols: usize,
    rows: usize,
) -> WeekGrid {
    let weeks = weeks
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|day| Cell {
                    date: day.date,
                    count: day.count,
                    is_future: matches!((reference, day.date), (Some(r), Some(d)) if d > r),
                })
                .collect()
        })
        .collect();
    WeekGrid { cols, rows, weeks }
}
