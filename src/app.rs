use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/week", get(handlers::get_week))
        .route("/api/week/next", post(handlers::next_week))
        .route("/api/week/prev", post(handlers::previous_week))
        .route("/api/week/load", post(handlers::load_week))
        .with_state(state)
}
