use crate::config::QueryStyle;
use crate::errors::QueryFailure;
use crate::models::{DisplayPoint, WeekSeries, WeekWindow};
use crate::source::CountSource;
use crate::week::{date_key, day_bounds, display_points, month_label, week_window};
use chrono::NaiveDate;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekState {
    pub current_week: u32,
    pub window: WeekWindow,
    pub series: WeekSeries,
    pub month_label: String,
    pub is_loading: bool,
}

impl WeekState {
    fn initial(anchor: NaiveDate) -> Self {
        Self {
            current_week: 1,
            window: week_window(anchor, 1).unwrap_or(WeekWindow {
                week: 1,
                start: anchor,
                end: anchor,
            }),
            series: WeekSeries::new(),
            month_label: String::new(),
            is_loading: false,
        }
    }

    pub fn display_points(&self) -> Vec<DisplayPoint> {
        display_points(&self.window, &self.series)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The source failed; state was reset to an empty week.
    Failed,
    /// A newer load was issued while this one was in flight; its result was dropped.
    Stale,
    /// Navigation was a no-op, or the target week lies past the last representable date.
    Skipped,
}

pub struct WeeklyAggregator {
    source: Arc<dyn CountSource>,
    style: QueryStyle,
    anchor: NaiveDate,
    generation: AtomicU64,
    state: watch::Sender<WeekState>,
}

struct Ticket {
    generation: u64,
    window: WeekWindow,
}

impl WeeklyAggregator {
    pub fn new(source: Arc<dyn CountSource>, style: QueryStyle, anchor: NaiveDate) -> Self {
        let (state, _) = watch::channel(WeekState::initial(anchor));
        Self {
            source,
            style,
            anchor,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn snapshot(&self) -> WeekState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WeekState> {
        self.state.subscribe()
    }

    pub fn current_week(&self) -> u32 {
        self.state.borrow().current_week
    }

    pub fn display_series(&self) -> Vec<DisplayPoint> {
        self.state.borrow().display_points()
    }

    /// Points the aggregator at `week` (0 counts as 1) and reloads it.
    pub async fn load_week(&self, week: u32) -> LoadOutcome {
        let week = week.max(1);
        self.navigate(|_| Some(week)).await
    }

    pub async fn next_week(&self) -> LoadOutcome {
        self.navigate(|current| Some(current.saturating_add(1))).await
    }

    /// No-op at week 1.
    pub async fn previous_week(&self) -> LoadOutcome {
        self.navigate(|current| (current > 1).then_some(current - 1)).await
    }

    async fn navigate(&self, target: impl FnOnce(u32) -> Option<u32>) -> LoadOutcome {
        let Some(ticket) = self.begin(target) else {
            debug!("navigation skipped at week {}", self.current_week());
            return LoadOutcome::Skipped;
        };
        let result = self.fetch(&ticket.window).await;
        self.finish(ticket, result)
    }

    fn begin(&self, target: impl FnOnce(u32) -> Option<u32>) -> Option<Ticket> {
        let mut ticket = None;
        self.state.send_if_modified(|state| {
            let Some(week) = target(state.current_week) else {
                return false;
            };
            let Some(window) = week_window(self.anchor, week) else {
                warn!(week = week, "week is out of the calendar range");
                return false;
            };
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.current_week = week;
            state.window = window;
            state.is_loading = true;
            ticket = Some(Ticket { generation, window });
            true
        });
        ticket
    }

    fn finish(&self, ticket: Ticket, result: Result<WeekSeries, QueryFailure>) -> LoadOutcome {
        let week = ticket.window.week;
        let mut outcome = LoadOutcome::Stale;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket.generation
                || state.current_week != week
            {
                return false;
            }
            match result {
                Ok(series) => {
                    state.month_label = month_label(ticket.window.days());
                    state.series = series;
                    outcome = LoadOutcome::Applied;
                }
                Err(err) => {
                    error!(week = week, "failed to load week: {err}");
                    state.series = WeekSeries::new();
                    state.month_label = String::new();
                    outcome = LoadOutcome::Failed;
                }
            }
            state.is_loading = false;
            true
        });

        match outcome {
            LoadOutcome::Applied => info!(week = week, "week loaded"),
            LoadOutcome::Stale => debug!(week = week, "discarding stale week result"),
            _ => {}
        }
        outcome
    }

    async fn fetch(&self, window: &WeekWindow) -> Result<WeekSeries, QueryFailure> {
        match self.style {
            QueryStyle::Enumeration => self.source.fetch_by_week_tag(window.week).await,
            QueryStyle::RangeAggregate => {
                let mut series = WeekSeries::new();
                for date in window.days() {
                    let (start, end) = day_bounds(date);
                    let count = self.source.fetch_count_in_range(start, end).await?;
                    series.insert(date_key(date), count);
                }
                Ok(series)
            }
        }
    }
}
