use crate::errors::QueryFailure;
use crate::models::WeekSeries;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Read-only access to the contact log store.
#[async_trait]
pub trait CountSource: Send + Sync {
    /// Per-date totals of every record tagged with `week`. Dates without records are absent.
    async fn fetch_by_week_tag(&self, week: u32) -> Result<WeekSeries, QueryFailure>;

    /// Number of contacts with `start <= timestamp <= end`.
    async fn fetch_count_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<u64, QueryFailure>;
}
