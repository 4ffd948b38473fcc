use crate::models::{DisplayPoint, WeekSeries, WeekWindow};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;

pub const DAYS_PER_WEEK: u64 = 7;

/// Window for `week`, counted in 7-day blocks from `anchor`. Week 0 is treated as week 1.
/// `None` when the window falls past the last representable date.
pub fn week_window(anchor: NaiveDate, week: u32) -> Option<WeekWindow> {
    let week = week.max(1);
    let start = anchor.checked_add_days(Days::new(u64::from(week - 1) * DAYS_PER_WEEK))?;
    let end = start.checked_add_days(Days::new(DAYS_PER_WEEK - 1))?;
    Some(WeekWindow { week, start, end })
}

impl WeekWindow {
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let (start, end) = (self.start, self.end);
        (0..DAYS_PER_WEEK)
            .map_while(move |offset| start.checked_add_days(Days::new(offset)))
            .take_while(move |date| *date <= end)
    }
}

/// First and last instant of `date`, millisecond precision.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid time of day");
    (date.and_time(NaiveTime::MIN), date.and_time(end_of_day))
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn date_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// Long month names touched by `dates`, first-seen order, joined with " - ".
pub fn month_label(dates: impl IntoIterator<Item = NaiveDate>) -> String {
    let mut months: Vec<String> = Vec::new();
    for date in dates {
        let name = date.format("%B").to_string();
        if !months.contains(&name) {
            months.push(name);
        }
    }
    months.join(" - ")
}

/// Every day of `window` plus every date in `series`, ascending, 0 when absent.
pub fn display_points(window: &WeekWindow, series: &WeekSeries) -> Vec<DisplayPoint> {
    let mut dates: BTreeSet<String> = window.days().map(date_key).collect();
    dates.extend(series.keys().cloned());

    dates
        .into_iter()
        .map(|key| {
            let count = series.get(&key).copied().unwrap_or_default();
            let label = NaiveDate::parse_from_str(&key, "%Y-%m-%d")
                .map(date_label)
                .unwrap_or_else(|_| key.clone());
            DisplayPoint {
                date: key,
                label,
                count,
            }
        })
        .collect()
}
