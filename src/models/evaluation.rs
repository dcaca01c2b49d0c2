// src/models/evaluation.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::user::UserId;

/// Answers keyed by question, replaced wholesale on every edit.
pub type AnswerMap = serde_json::Map<String, Value>;

/// Graded result of an answer submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub max_score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub weak_subtopics: Option<Vec<String>>,
}

/// Body of `POST /submit_answers`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswersRequest {
    pub user_id: UserId,
    pub topic: String,
    pub answers: AnswerMap,
}

/// Success body of `POST /submit_answers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAnswersResponse {
    #[serde(default)]
    pub evaluation: Option<Value>,
    #[serde(default)]
    pub evaluation_text: Option<String>,
}
