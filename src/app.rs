use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::add_habit))
        .route("/habits/remove", post(handlers::remove_habit))
        .route("/editor/mode", post(handlers::set_icon_mode))
        .route("/editor/icon", post(handlers::select_icon))
        .route("/calendar/prev", post(handlers::previous_month))
        .route("/calendar/next", post(handlers::next_month))
        .route("/calendar/select", post(handlers::select_month))
        .route("/completions/toggle", post(handlers::toggle_completion))
        .route("/modal/open", post(handlers::open_day))
        .route("/modal/close", post(handlers::close_day))
        .route("/api/habits", get(handlers::get_habits).post(handlers::create_habit))
        .route("/api/habits/remove", post(handlers::delete_habit))
        .route("/api/completions", get(handlers::get_completions))
        .route("/api/completions/toggle", post(handlers::toggle))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
