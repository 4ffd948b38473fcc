use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts keyed by `YYYY-MM-DD` date strings.
pub type WeekSeries = BTreeMap<String, u64>;

/// One document of the per-day statistics collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStat {
    pub date: String,
    #[serde(rename = "LogCount", default)]
    pub log_count: u64,
    pub week: u32,
}

/// One logged contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactLog {
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub stats: Vec<ContactStat>,
    #[serde(default)]
    pub contacts: Vec<ContactLog>,
}

/// The 7 consecutive calendar days covered by a week index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub week: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub date: String,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoadWeekRequest {
    pub week: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekView {
    pub week: u32,
    pub is_loading: bool,
    pub month_label: String,
    pub display_year: i32,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub points: Vec<DisplayPoint>,
}
