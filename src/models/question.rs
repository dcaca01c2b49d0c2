// src/models/question.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A practice question as generated by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Question {
    /// The text content of the question.
    #[serde(default)]
    pub question: String,

    /// Answer choices for multiple-choice questions.
    #[serde(default)]
    pub options: Option<Vec<String>>,

    /// Kept from the response but never rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn has_options(&self) -> bool {
        self.options.is_some()
    }

    pub fn option_list(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /generate_questions`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionsRequest {
    pub topic: String,
    pub difficulty: String,
    pub num: u32,
}

/// Success body of `POST /generate_questions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateQuestionsResponse {
    #[serde(default)]
    pub questions: Option<Value>,
    #[serde(default)]
    pub questions_text: Option<String>,
}
