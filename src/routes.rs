// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{forms, page},
    state::AppState,
};

/// Assembles the page router.
///
/// * `GET /` renders the page, `GET /state` serves the view as JSON.
/// * Each form posts to its own route and redirects back to `/`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/state", get(page::state_snapshot))
        .route("/user", post(forms::create_user))
        .route("/plan", post(forms::generate_plan))
        .route("/questions", post(forms::generate_questions))
        .route("/answers", post(forms::submit_answers))
        .route("/answers/draft", post(forms::check_answers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
