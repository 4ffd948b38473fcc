use crate::aggregator::WeeklyAggregator;
use crate::config::Config;
use crate::source::CountSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub aggregator: Arc<WeeklyAggregator>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn CountSource>) -> Self {
        let aggregator = WeeklyAggregator::new(source, config.query_style, config.anchor_date);
        Self {
            config: Arc::new(config),
            aggregator: Arc::new(aggregator),
        }
    }
}
