use crate::aggregator::{LoadOutcome, WeekState};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{LoadWeekRequest, WeekView};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.aggregator.snapshot();
    Html(render_index(&to_view(&state.config, &snapshot)))
}

pub async fn get_week(State(state): State<AppState>) -> Json<WeekView> {
    Json(to_view(&state.config, &state.aggregator.snapshot()))
}

pub async fn next_week(State(state): State<AppState>) -> Json<WeekView> {
    state.aggregator.next_week().await;
    Json(to_view(&state.config, &state.aggregator.snapshot()))
}

pub async fn previous_week(State(state): State<AppState>) -> Json<WeekView> {
    state.aggregator.previous_week().await;
    Json(to_view(&state.config, &state.aggregator.snapshot()))
}

pub async fn load_week(
    State(state): State<AppState>,
    Json(payload): Json<LoadWeekRequest>,
) -> Result<Json<WeekView>, AppError> {
    if payload.week == 0 {
        return Err(AppError::bad_request("week must be 1 or greater"));
    }

    if state.aggregator.load_week(payload.week).await == LoadOutcome::Skipped {
        return Err(AppError::bad_request(format!(
            "week {} is out of the calendar range",
            payload.week
        )));
    }
    Ok(Json(to_view(&state.config, &state.aggregator.snapshot())))
}

pub fn to_view(config: &Config, state: &WeekState) -> WeekView {
    WeekView {
        week: state.current_week,
        is_loading: state.is_loading,
        month_label: state.month_label.clone(),
        display_year: config.display_year,
        can_go_back: state.current_week > 1,
        can_go_forward: state.current_week <= config.max_week,
        points: state.display_points(),
    }
}
