use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/log", get(handlers::get_log))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/activities", post(handlers::add_activity))
        .route("/api/workouts", post(handlers::add_workout))
        .route("/api/hydration", post(handlers::add_hydration))
        .route("/api/workouts/:id/sets", post(handlers::modify_set))
        .route("/api/workouts/:id/sets/:index", post(handlers::toggle_set))
        .route("/api/workouts/:id/notes", put(handlers::set_note))
        .route("/api/entries/:collection/:id", delete(handlers::delete_item))
        .route("/api/undo", post(handlers::undo_delete))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
