// src/backend/mod.rs

pub mod http;

use async_trait::async_trait;

use crate::{
    error::BackendError,
    models::{
        evaluation::{SubmitAnswersRequest, SubmitAnswersResponse},
        plan::{GeneratePlanRequest, GeneratePlanResponse},
        question::{GenerateQuestionsRequest, GenerateQuestionsResponse},
        user::{CreateUserRequest, CreateUserResponse},
    },
};

pub use http::HttpBackend;

/// The four exchanges offered by the exam-prep backend.
#[async_trait]
pub trait ExamPrepBackend: Send + Sync {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<CreateUserResponse, BackendError>;

    async fn generate_plan(
        &self,
        req: &GeneratePlanRequest,
    ) -> Result<GeneratePlanResponse, BackendError>;

    async fn generate_questions(
        &self,
        req: &GenerateQuestionsRequest,
    ) -> Result<GenerateQuestionsResponse, BackendError>;

    async fn submit_answers(
        &self,
        req: &SubmitAnswersRequest,
    ) -> Result<SubmitAnswersResponse, BackendError>;
}
