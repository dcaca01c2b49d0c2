// tests/view_tests.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use exam_prep_client::{
    actions,
    backend::ExamPrepBackend,
    config::PrepDefaults,
    error::BackendError,
    models::{
        Fetched,
        evaluation::{SubmitAnswersRequest, SubmitAnswersResponse},
        plan::{GeneratePlanRequest, GeneratePlanResponse},
        question::{GenerateQuestionsRequest, GenerateQuestionsResponse},
        user::{CreateUserRequest, CreateUserResponse, UserId, UserProfile},
    },
    render::{render_evaluation, render_plan, render_questions},
    view::{Action, CREATE_USER_FIRST, ClientView, INVALID_ANSWERS_JSON},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tokio::sync::{Mutex, Notify};

/// In-memory backend that replays canned bodies and records every call.
#[derive(Default)]
struct FakeBackend {
    replies: HashMap<&'static str, Result<Value, BackendError>>,
    calls: StdMutex<Vec<(&'static str, Value)>>,
    /// When set, `generate_questions` waits for a permit before replying.
    questions_gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    fn reply(mut self, endpoint: &'static str, body: Value) -> Self {
        self.replies.insert(endpoint, Ok(body));
        self
    }

    fn fail(mut self, endpoint: &'static str, err: BackendError) -> Self {
        self.replies.insert(endpoint, Err(err));
        self
    }

    fn gate_questions(mut self, gate: Arc<Notify>) -> Self {
        self.questions_gate = Some(gate);
        self
    }

    fn calls(&self) -> Vec<(&'static str, Value)> {
        self.calls.lock().unwrap().clone()
    }

    fn exchange<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<R, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint, serde_json::to_value(body).unwrap()));

        match self.replies.get(endpoint) {
            Some(Ok(value)) => Ok(serde_json::from_value(value.clone()).unwrap()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(BackendError::Status(404)),
        }
    }
}

#[async_trait]
impl ExamPrepBackend for FakeBackend {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<CreateUserResponse, BackendError> {
        self.exchange("user", req)
    }

    async fn generate_plan(
        &self,
        req: &GeneratePlanRequest,
    ) -> Result<GeneratePlanResponse, BackendError> {
        self.exchange("generate_plan", req)
    }

    async fn generate_questions(
        &self,
        req: &GenerateQuestionsRequest,
    ) -> Result<GenerateQuestionsResponse, BackendError> {
        if let Some(gate) = &self.questions_gate {
            gate.notified().await;
        }
        self.exchange("generate_questions", req)
    }

    async fn submit_answers(
        &self,
        req: &SubmitAnswersRequest,
    ) -> Result<SubmitAnswersResponse, BackendError> {
        self.exchange("submit_answers", req)
    }
}

fn new_view() -> Mutex<ClientView> {
    Mutex::new(ClientView::new(PrepDefaults::default()))
}

fn five_questions() -> Value {
    let questions: Vec<Value> = (1..=5)
        .map(|i| json!({"question": format!("Graph question {}", i), "options": ["A", "B"]}))
        .collect();
    json!({ "questions": questions })
}

#[tokio::test]
async fn guarded_actions_without_user_make_no_call() {
    let backend = FakeBackend::default()
        .reply("generate_plan", json!({"plan_text": "unused"}))
        .reply("submit_answers", json!({"evaluation_text": "unused"}));
    let view = new_view();

    actions::generate_plan(&view, &backend).await;
    assert_eq!(view.lock().await.error.as_deref(), Some(CREATE_USER_FIRST));

    view.lock().await.error = None;
    actions::submit_answers(&view, &backend).await;

    let view = view.lock().await;
    assert_eq!(view.error.as_deref(), Some("Please create a user first"));
    assert!(!view.loading());
    assert!(view.plan.is_absent());
    assert!(view.evaluation.is_absent());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn alice_registers_and_gets_a_structured_plan() {
    let backend = FakeBackend::default()
        .reply("user", json!({"user_id": "u_123"}))
        .reply(
            "generate_plan",
            json!({
                "plan": {"plan": [{
                    "day": "Day 1",
                    "time_allocation": "2h",
                    "topics": ["DP"],
                    "activities": ["Read", "Solve"]
                }]},
                "plan_text": "{...raw model output...}"
            }),
        );
    let view = new_view();

    {
        let mut v = view.lock().await;
        let syllabus = v.profile.syllabus.clone();
        v.set_profile(UserProfile {
            name: "Alice".into(),
            email: "a@x.com".into(),
            syllabus,
        });
    }

    actions::create_user(&view, &backend).await;
    assert_eq!(
        view.lock().await.user_id,
        Some(UserId::Text("u_123".to_string()))
    );

    actions::generate_plan(&view, &backend).await;

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        (
            "user",
            json!({
                "name": "Alice",
                "email": "a@x.com",
                "syllabus": "Discrete Mathematics, Data Structures, Algorithms"
            })
        )
    );
    assert_eq!(
        calls[1],
        (
            "generate_plan",
            json!({
                "user_id": "u_123",
                "syllabus": "Discrete Mathematics, Data Structures, Algorithms",
                "exam_date": "2025-10-15",
                "daily_hours": 2,
                "performance": []
            })
        )
    );

    let view = view.lock().await;
    assert!(view.error.is_none());
    assert!(!view.loading());

    let html = render_plan(&view.plan).unwrap();
    let found: Vec<usize> = ["Day 1", "2h", "DP", "Read, Solve"]
        .iter()
        .map(|s| html.find(s).expect("plan field rendered"))
        .collect();
    assert!(found.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn numeric_user_id_is_echoed_back_as_a_number() {
    let backend = FakeBackend::default()
        .reply("user", json!({"user_id": 7}))
        .reply("submit_answers", json!({"evaluation_text": "ok"}));
    let view = new_view();

    actions::create_user(&view, &backend).await;
    view.lock().await.edit_answers(r#"{"q1": "B"}"#);
    actions::submit_answers(&view, &backend).await;

    let calls = backend.calls();
    assert_eq!(calls[1].1["user_id"], json!(7));
    assert_eq!(calls[1].1["topic"], json!("Dynamic Programming"));
    assert_eq!(calls[1].1["answers"], json!({"q1": "B"}));
}

#[tokio::test]
async fn questions_need_no_user() {
    let backend = FakeBackend::default().reply("generate_questions", five_questions());
    let view = new_view();

    view.lock().await.set_topic("Graphs".to_string());
    actions::generate_questions(&view, &backend).await;

    assert_eq!(
        backend.calls(),
        vec![(
            "generate_questions",
            json!({"topic": "Graphs", "difficulty": "medium", "num": 5})
        )]
    );

    let view = view.lock().await;
    assert!(view.error.is_none());
    let html = render_questions(&view.questions).unwrap();
    for i in 1..=5 {
        assert!(html.contains(&format!("Q{}:", i)));
    }
    assert!(!html.contains("Q6:"));
}

#[tokio::test]
async fn text_only_plan_is_stored_as_text() {
    let backend = FakeBackend::default()
        .reply("user", json!({"user_id": 1}))
        .reply("generate_plan", json!({"plan_text": "Revise trees every morning"}));
    let view = new_view();

    actions::create_user(&view, &backend).await;
    actions::generate_plan(&view, &backend).await;

    let view = view.lock().await;
    assert_eq!(
        view.plan,
        Fetched::Text("Revise trees every morning".to_string())
    );
    assert_eq!(
        render_plan(&view.plan).unwrap(),
        "Revise trees every morning"
    );
}

#[tokio::test]
async fn text_only_evaluation_renders_verbatim() {
    let backend = FakeBackend::default()
        .reply("user", json!({"user_id": "u_9"}))
        .reply(
            "submit_answers",
            json!({"evaluation_text": "Score 3 of 5\nReview <memoization>"}),
        );
    let view = new_view();

    actions::create_user(&view, &backend).await;
    view.lock().await.edit_answers(r#"{"q1": "A"}"#);
    actions::submit_answers(&view, &backend).await;

    let view = view.lock().await;
    assert_eq!(
        view.evaluation,
        Fetched::Text("Score 3 of 5\nReview <memoization>".to_string())
    );
    assert_eq!(
        render_evaluation(&view.evaluation).unwrap(),
        "Score 3 of 5\nReview &lt;memoization&gt;"
    );
}

#[tokio::test]
async fn zero_user_id_counts_as_no_user() {
    let backend = FakeBackend::default()
        .reply("user", json!({"user_id": 0}))
        .reply("generate_plan", json!({"plan_text": "unused"}));
    let view = new_view();

    actions::create_user(&view, &backend).await;
    assert_eq!(view.lock().await.user_id, None);

    actions::generate_plan(&view, &backend).await;

    let view = view.lock().await;
    assert_eq!(view.error.as_deref(), Some(CREATE_USER_FIRST));
    assert!(!view.can_trigger(Action::GeneratePlan));
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn backend_failure_sets_prefixed_error_and_clears_loading() {
    let backend = FakeBackend::default()
        .fail(
            "user",
            BackendError::Rejected {
                status: 400,
                detail: "name and email required".to_string(),
            },
        )
        .fail(
            "generate_questions",
            BackendError::Transport("connection refused".to_string()),
        );
    let view = new_view();

    actions::create_user(&view, &backend).await;
    {
        let view = view.lock().await;
        assert_eq!(
            view.error.as_deref(),
            Some("Error creating user: name and email required")
        );
        assert!(view.user_id.is_none());
        assert!(!view.loading());
    }

    actions::generate_questions(&view, &backend).await;
    let view = view.lock().await;
    assert_eq!(
        view.error.as_deref(),
        Some("Error generating questions: connection refused")
    );
    assert!(!view.loading());
}

#[tokio::test]
async fn status_without_detail_falls_back_to_status_text() {
    let backend = FakeBackend::default()
        .reply("user", json!({"user_id": "u_1"}))
        .fail("submit_answers", BackendError::Status(500));
    let view = new_view();

    actions::create_user(&view, &backend).await;
    actions::submit_answers(&view, &backend).await;

    assert_eq!(
        view.lock().await.error.as_deref(),
        Some("Error submitting answers: Request failed with status code 500")
    );
}

#[tokio::test]
async fn new_request_clears_previous_error() {
    let backend = FakeBackend::default().reply("generate_questions", five_questions());
    let view = new_view();

    actions::generate_plan(&view, &backend).await;
    assert!(view.lock().await.error.is_some());

    actions::generate_questions(&view, &backend).await;
    assert!(view.lock().await.error.is_none());
}

#[test]
fn malformed_answers_keep_previous_map() {
    let mut view = ClientView::default();

    assert!(view.edit_answers(r#"{"q1": "answer", "q2": "other"}"#));
    let before = view.answers.clone();
    assert_eq!(before.len(), 2);

    assert!(!view.edit_answers(r#"{"q1": "answ"#));
    assert_eq!(view.answers, before);
    assert_eq!(view.error.as_deref(), Some(INVALID_ANSWERS_JSON));

    assert!(!view.edit_answers("[1, 2, 3]"));
    assert_eq!(view.answers, before);
    assert_eq!(view.answers_draft, "[1, 2, 3]");
}

#[test]
fn answers_are_replaced_not_merged() {
    let mut view = ClientView::default();

    view.edit_answers(r#"{"q1": "a", "q2": "b"}"#);
    view.edit_answers(r#"{"q3": "c"}"#);
    assert_eq!(view.answers.len(), 1);
    assert!(view.answers.contains_key("q3"));

    view.edit_answers("");
    assert!(view.answers.is_empty());
}

#[test]
fn stale_completion_is_dropped() {
    let mut view = ClientView::default();

    let (first, _) = view.begin_generate_questions();
    let (second, _) = view.begin_generate_questions();

    view.finish_generate_questions(
        first,
        Ok(GenerateQuestionsResponse {
            questions: None,
            questions_text: Some("old".to_string()),
        }),
    );
    assert!(view.questions.is_absent());
    assert!(view.is_busy(Action::GenerateQuestions));

    view.finish_generate_questions(
        second,
        Ok(GenerateQuestionsResponse {
            questions: None,
            questions_text: Some("new".to_string()),
        }),
    );
    assert_eq!(view.questions, Fetched::Text("new".to_string()));
    assert!(!view.loading());
}

#[test]
fn response_without_either_field_keeps_previous_result() {
    let mut view = ClientView::default();

    let (ticket, _) = view.begin_generate_questions();
    view.finish_generate_questions(
        ticket,
        Ok(GenerateQuestionsResponse {
            questions: None,
            questions_text: Some("first batch".to_string()),
        }),
    );

    let (ticket, _) = view.begin_generate_questions();
    view.finish_generate_questions(ticket, Ok(GenerateQuestionsResponse::default()));

    assert_eq!(view.questions, Fetched::Text("first batch".to_string()));
    assert!(!view.loading());
}

#[tokio::test]
async fn overlapping_actions_keep_their_own_busy_marks() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(
        FakeBackend::default()
            .reply("user", json!({"user_id": "u_9"}))
            .reply("generate_questions", five_questions())
            .gate_questions(gate.clone()),
    );
    let view = Arc::new(new_view());

    let pending = {
        let view = view.clone();
        let backend = backend.clone();
        tokio::spawn(async move { actions::generate_questions(&view, &*backend).await })
    };

    while !view.lock().await.is_busy(Action::GenerateQuestions) {
        tokio::task::yield_now().await;
    }

    actions::create_user(&view, &*backend).await;
    {
        let view = view.lock().await;
        assert!(view.user_id.is_some());
        assert!(!view.is_busy(Action::CreateUser));
        assert!(view.loading(), "questions request is still in flight");
        assert!(!view.can_trigger(Action::GenerateQuestions));
        assert!(view.can_trigger(Action::GeneratePlan));
    }

    gate.notify_one();
    pending.await.unwrap();

    let view = view.lock().await;
    assert!(!view.loading());
    assert!(view.questions.structured().is_some());
}
