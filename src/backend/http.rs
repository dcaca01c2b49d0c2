// src/backend/http.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::{
    backend::ExamPrepBackend,
    error::BackendError,
    models::{
        evaluation::{SubmitAnswersRequest, SubmitAnswersResponse},
        plan::{GeneratePlanRequest, GeneratePlanResponse},
        question::{GenerateQuestionsRequest, GenerateQuestionsResponse},
        user::{CreateUserRequest, CreateUserResponse},
    },
};

/// Error body the backend sends alongside a non-success status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<Value>,
}

/// reqwest-backed client for the backend's JSON API.
///
/// No timeout, retry or caching is applied; a failure surfaces once.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Result<Self, BackendError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` onto the base address, keeping the base path (`/api`).
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| match e {
                    Value::String(s) if !s.is_empty() => Some(s),
                    _ => None,
                });

            return Err(match detail {
                Some(detail) => BackendError::Rejected {
                    status: status.as_u16(),
                    detail,
                },
                None => BackendError::Status(status.as_u16()),
            });
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl ExamPrepBackend for HttpBackend {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<CreateUserResponse, BackendError> {
        self.post("user", req).await
    }

    async fn generate_plan(
        &self,
        req: &GeneratePlanRequest,
    ) -> Result<GeneratePlanResponse, BackendError> {
        self.post("generate_plan", req).await
    }

    async fn generate_questions(
        &self,
        req: &GenerateQuestionsRequest,
    ) -> Result<GenerateQuestionsResponse, BackendError> {
        self.post("generate_questions", req).await
    }

    async fn submit_answers(
        &self,
        req: &SubmitAnswersRequest,
    ) -> Result<SubmitAnswersResponse, BackendError> {
        self.post("submit_answers", req).await
    }
}
