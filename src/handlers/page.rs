// src/handlers/page.rs

use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::{error::AppError, render::render_page, state::SharedView};

/// Renders the whole page from the current view.
pub async fn index(State(view): State<SharedView>) -> Result<Html<String>, AppError> {
    let view = view.lock().await;
    Ok(Html(render_page(&view)?))
}

/// JSON snapshot of every view field plus the busy state.
pub async fn state_snapshot(State(view): State<SharedView>) -> Response {
    let view = view.lock().await;
    Json(view.snapshot()).into_response()
}
