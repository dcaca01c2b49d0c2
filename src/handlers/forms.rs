// src/handlers/forms.rs

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;

use crate::{
    actions,
    models::user::UserProfile,
    state::{AppState, SharedBackend, SharedView},
};

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub syllabus: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswersForm {
    #[serde(default)]
    pub answers: String,
}

/// Finishes an already begun exchange on its own task.
///
/// The handler redirects without waiting, so the next page load shows the
/// action as in flight. The task owns the busy mark from here and settles it
/// whether or not the browser is still connected.
fn send_in_background<F, Fut>(state: &AppState, send: F)
where
    F: FnOnce(SharedView, SharedBackend) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(send(state.view.clone(), state.backend.clone()));
}

/// Stores the profile fields and creates or updates the backend user.
pub async fn create_user(State(state): State<AppState>, Form(form): Form<ProfileForm>) -> Redirect {
    let begun = {
        let mut view = state.view.lock().await;
        view.set_profile(UserProfile {
            name: form.name,
            email: form.email,
            syllabus: form.syllabus,
        });
        view.begin_create_user()
    };

    send_in_background(&state, |view, backend| async move {
        actions::send_create_user(&view, backend.as_ref(), begun).await
    });

    Redirect::to("/")
}

pub async fn generate_plan(State(state): State<AppState>) -> Redirect {
    let Some(begun) = state.view.lock().await.begin_generate_plan() else {
        return Redirect::to("/");
    };

    send_in_background(&state, |view, backend| async move {
        actions::send_generate_plan(&view, backend.as_ref(), begun).await
    });

    Redirect::to("/")
}

pub async fn generate_questions(
    State(state): State<AppState>,
    Form(form): Form<TopicForm>,
) -> Redirect {
    let begun = {
        let mut view = state.view.lock().await;
        view.set_topic(form.topic);
        view.begin_generate_questions()
    };

    send_in_background(&state, |view, backend| async move {
        actions::send_generate_questions(&view, backend.as_ref(), begun).await
    });

    Redirect::to("/")
}

/// Applies the raw answer text as an edit, then submits the new map.
/// Text that does not parse leaves the error on the page and sends nothing.
pub async fn submit_answers(
    State(state): State<AppState>,
    Form(form): Form<AnswersForm>,
) -> Redirect {
    let begun = {
        let mut view = state.view.lock().await;
        if !view.edit_answers(&form.answers) {
            return Redirect::to("/");
        }
        view.begin_submit_answers()
    };
    let Some(begun) = begun else {
        return Redirect::to("/");
    };

    send_in_background(&state, |view, backend| async move {
        actions::send_submit_answers(&view, backend.as_ref(), begun).await
    });

    Redirect::to("/")
}

/// Applies the raw answer text as an edit without submitting.
pub async fn check_answers(
    State(view): State<SharedView>,
    Form(form): Form<AnswersForm>,
) -> Redirect {
    view.lock().await.edit_answers(&form.answers);
    Redirect::to("/")
}
