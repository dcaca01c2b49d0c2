// src/models/plan.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::user::UserId;

/// A generated study plan in its structured form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudyPlan {
    /// Short study tips. `None` when the backend sent no `tips` key.
    #[serde(default)]
    pub tips: Option<Vec<String>>,

    /// Day entries in schedule order.
    #[serde(default)]
    pub plan: Vec<DayEntry>,
}

/// One day of a study plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time_allocation: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl DayEntry {
    pub fn topics_joined(&self) -> String {
        self.topics.join(", ")
    }

    pub fn activities_joined(&self) -> String {
        self.activities.join(", ")
    }
}

/// Body of `POST /generate_plan`.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePlanRequest {
    pub user_id: UserId,
    pub syllabus: String,
    /// Serialized as `YYYY-MM-DD`.
    pub exam_date: NaiveDate,
    pub daily_hours: u32,
    /// Recent performance history; the client always sends an empty list.
    pub performance: Vec<Value>,
}

/// Success body of `POST /generate_plan`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratePlanResponse {
    #[serde(default)]
    pub plan: Option<Value>,
    #[serde(default)]
    pub plan_text: Option<String>,
}
