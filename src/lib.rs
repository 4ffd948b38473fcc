pub mod aggregator;
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod source;
pub mod state;
pub mod storage;
pub mod ui;
pub mod week;

pub use aggregator::{LoadOutcome, WeekState, WeeklyAggregator};
pub use app::router;
pub use config::{Config, QueryStyle};
pub use source::CountSource;
pub use state::AppState;
pub use storage::FileCountSource;
