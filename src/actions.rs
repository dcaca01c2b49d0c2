// src/actions.rs

//! Runs one user action end to end against the shared view.
//!
//! The view lock is taken twice per exchange, to begin and to finish, and
//! is never held across the backend call. Independent actions therefore
//! overlap freely, and completions are fenced by their tickets.
//!
//! Each action comes in two forms. `create_user` and friends begin and send
//! in one go. `send_*` takes an exchange that was already begun, so a caller
//! can mark the action busy, answer its own client, and let the backend call
//! finish elsewhere.

use tokio::sync::Mutex;

use crate::{
    backend::ExamPrepBackend,
    models::{
        evaluation::SubmitAnswersRequest, plan::GeneratePlanRequest,
        question::GenerateQuestionsRequest, user::CreateUserRequest,
    },
    view::{ClientView, Ticket},
};

/// Sends the profile to `/user` and stores the returned identifier.
pub async fn create_user(view: &Mutex<ClientView>, backend: &dyn ExamPrepBackend) {
    let begun = view.lock().await.begin_create_user();
    send_create_user(view, backend, begun).await;
}

pub async fn send_create_user(
    view: &Mutex<ClientView>,
    backend: &dyn ExamPrepBackend,
    (ticket, request): (Ticket, CreateUserRequest),
) {
    tracing::info!("Creating user {:?}", request.email);

    let result = backend.create_user(&request).await;
    view.lock().await.finish_create_user(ticket, result);
}

/// Requests a study plan. Refused without a network call when no user exists.
pub async fn generate_plan(view: &Mutex<ClientView>, backend: &dyn ExamPrepBackend) {
    let Some(begun) = view.lock().await.begin_generate_plan() else {
        return;
    };
    send_generate_plan(view, backend, begun).await;
}

pub async fn send_generate_plan(
    view: &Mutex<ClientView>,
    backend: &dyn ExamPrepBackend,
    (ticket, request): (Ticket, GeneratePlanRequest),
) {
    tracing::info!(
        "Generating plan for user {} (exam {})",
        request.user_id,
        request.exam_date
    );

    let result = backend.generate_plan(&request).await;
    view.lock().await.finish_generate_plan(ticket, result);
}

/// Requests practice questions for the current topic. Needs no user.
pub async fn generate_questions(view: &Mutex<ClientView>, backend: &dyn ExamPrepBackend) {
    let begun = view.lock().await.begin_generate_questions();
    send_generate_questions(view, backend, begun).await;
}

pub async fn send_generate_questions(
    view: &Mutex<ClientView>,
    backend: &dyn ExamPrepBackend,
    (ticket, request): (Ticket, GenerateQuestionsRequest),
) {
    tracing::info!(
        "Generating {} {} questions on {:?}",
        request.num,
        request.difficulty,
        request.topic
    );

    let result = backend.generate_questions(&request).await;
    view.lock().await.finish_generate_questions(ticket, result);
}

/// Submits the current answer map for grading. Refused without a network
/// call when no user exists.
pub async fn submit_answers(view: &Mutex<ClientView>, backend: &dyn ExamPrepBackend) {
    let Some(begun) = view.lock().await.begin_submit_answers() else {
        return;
    };
    send_submit_answers(view, backend, begun).await;
}

pub async fn send_submit_answers(
    view: &Mutex<ClientView>,
    backend: &dyn ExamPrepBackend,
    (ticket, request): (Ticket, SubmitAnswersRequest),
) {
    tracing::info!(
        "Submitting {} answers on {:?} for user {}",
        request.answers.len(),
        request.topic,
        request.user_id
    );

    let result = backend.submit_answers(&request).await;
    view.lock().await.finish_submit_answers(ticket, result);
}
