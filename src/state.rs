use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::{backend::ExamPrepBackend, config::PrepDefaults, view::ClientView};

pub type SharedView = Arc<Mutex<ClientView>>;
pub type SharedBackend = Arc<dyn ExamPrepBackend>;

#[derive(Clone)]
pub struct AppState {
    pub view: SharedView,
    pub backend: SharedBackend,
}

impl AppState {
    /// Fresh view seeded from the configured defaults.
    pub fn new(defaults: PrepDefaults, backend: SharedBackend) -> Self {
        Self {
            view: Arc::new(Mutex::new(ClientView::new(defaults))),
            backend,
        }
    }
}

impl FromRef<AppState> for SharedView {
    fn from_ref(state: &AppState) -> Self {
        state.view.clone()
    }
}

impl FromRef<AppState> for SharedBackend {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}
