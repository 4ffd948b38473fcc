use crate::errors::QueryFailure;
use crate::models::{AppData, WeekSeries};
use crate::source::CountSource;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub async fn load_data(path: &Path) -> Result<AppData, QueryFailure> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("data file {} not found, treating as empty", path.display());
            Ok(AppData::default())
        }
        Err(err) => Err(err.into()),
    }
}

impl AppData {
    pub fn counts_by_week_tag(&self, week: u32) -> WeekSeries {
        let mut series = WeekSeries::new();
        for stat in self.stats.iter().filter(|stat| stat.week == week) {
            let entry = series.entry(stat.date.clone()).or_default();
            *entry = entry.saturating_add(stat.log_count);
        }
        series
    }

    pub fn count_in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> u64 {
        self.contacts
            .iter()
            .filter(|contact| contact.timestamp >= start && contact.timestamp <= end)
            .count() as u64
    }
}

/// Store backed by a JSON document file, re-read on every query.
#[derive(Debug, Clone)]
pub struct FileCountSource {
    path: PathBuf,
}

impl FileCountSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CountSource for FileCountSource {
    async fn fetch_by_week_tag(&self, week: u32) -> Result<WeekSeries, QueryFailure> {
        let data = load_data(&self.path).await?;
        Ok(data.counts_by_week_tag(week))
    }

    async fn fetch_count_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<u64, QueryFailure> {
        let data = load_data(&self.path).await?;
        Ok(data.count_in_range(start, end))
    }
}
