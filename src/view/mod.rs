// src/view/mod.rs

pub mod tracker;

use serde::Serialize;

use crate::{
    config::PrepDefaults,
    error::BackendError,
    models::{
        Fetched,
        evaluation::{AnswerMap, Evaluation, SubmitAnswersRequest, SubmitAnswersResponse},
        plan::{GeneratePlanRequest, GeneratePlanResponse, StudyPlan},
        question::{GenerateQuestionsRequest, GenerateQuestionsResponse, Question},
        user::{CreateUserRequest, CreateUserResponse, UserId, UserProfile},
    },
};

pub use tracker::{Action, RequestTracker, Ticket};

pub const CREATE_USER_FIRST: &str = "Please create a user first";
pub const INVALID_ANSWERS_JSON: &str = "Invalid JSON format";

/// All state behind the page, for the lifetime of the process.
///
/// Every exchange runs in two steps so the owner can release its lock while
/// the backend call is in flight:
///
/// * `begin_*` clears the error, marks the action busy and returns the
///   request body together with a [`Ticket`]. Guarded actions return `None`
///   and set the error instead when no user exists.
/// * `finish_*` takes the ticket back with the outcome. It always settles
///   the busy mark; a stale ticket is dropped without touching any field.
#[derive(Debug)]
pub struct ClientView {
    pub profile: UserProfile,
    pub user_id: Option<UserId>,
    pub plan: Fetched<StudyPlan>,
    pub topic: String,
    pub questions: Fetched<Vec<Question>>,
    pub answers: AnswerMap,
    /// Raw answer text as last typed.
    pub answers_draft: String,
    pub evaluation: Fetched<Evaluation>,
    pub error: Option<String>,
    defaults: PrepDefaults,
    tracker: RequestTracker,
}

/// Serializable copy of the view served at `/state`.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub profile: &'a UserProfile,
    pub user_id: Option<&'a UserId>,
    pub plan: &'a Fetched<StudyPlan>,
    pub topic: &'a str,
    pub questions: &'a Fetched<Vec<Question>>,
    pub answers: &'a AnswerMap,
    pub evaluation: &'a Fetched<Evaluation>,
    pub error: Option<&'a str>,
    pub loading: bool,
    pub busy: Vec<Action>,
}

impl ClientView {
    pub fn new(defaults: PrepDefaults) -> Self {
        Self {
            profile: UserProfile {
                name: String::new(),
                email: String::new(),
                syllabus: defaults.syllabus.clone(),
            },
            user_id: None,
            plan: Fetched::Absent,
            topic: defaults.topic.clone(),
            questions: Fetched::Absent,
            answers: AnswerMap::new(),
            answers_draft: String::new(),
            evaluation: Fetched::Absent,
            error: None,
            defaults,
            tracker: RequestTracker::default(),
        }
    }

    /// Global busy indicator: true while any action has a request in flight.
    pub fn loading(&self) -> bool {
        self.tracker.any_busy()
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.tracker.is_busy(action)
    }

    /// Whether the control for `action` should be enabled.
    pub fn can_trigger(&self, action: Action) -> bool {
        !self.is_busy(action) && (!action.requires_user() || self.user_id.is_some())
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }

    pub fn set_topic(&mut self, topic: String) {
        self.topic = topic;
    }

    /// Re-parses the raw answer text.
    ///
    /// Empty input counts as `{}`. Anything that is not a JSON object sets
    /// the error and keeps the previous map.
    pub fn edit_answers(&mut self, raw: &str) -> bool {
        self.answers_draft = raw.to_string();

        let source = if raw.trim().is_empty() { "{}" } else { raw };
        match serde_json::from_str::<serde_json::Value>(source) {
            Ok(serde_json::Value::Object(map)) => {
                self.answers = map;
                true
            }
            _ => {
                tracing::debug!("Rejected answer draft that is not a JSON object");
                self.error = Some(INVALID_ANSWERS_JSON.to_string());
                false
            }
        }
    }

    pub fn begin_create_user(&mut self) -> (Ticket, CreateUserRequest) {
        let ticket = self.begin(Action::CreateUser);
        (ticket, self.profile.clone())
    }

    pub fn begin_generate_plan(&mut self) -> Option<(Ticket, GeneratePlanRequest)> {
        let user_id = self.require_user(Action::GeneratePlan)?;
        let ticket = self.begin(Action::GeneratePlan);
        let request = GeneratePlanRequest {
            user_id,
            syllabus: self.profile.syllabus.clone(),
            exam_date: self.defaults.exam_date,
            daily_hours: self.defaults.daily_hours,
            performance: Vec::new(),
        };
        Some((ticket, request))
    }

    pub fn begin_generate_questions(&mut self) -> (Ticket, GenerateQuestionsRequest) {
        let ticket = self.begin(Action::GenerateQuestions);
        let request = GenerateQuestionsRequest {
            topic: self.topic.clone(),
            difficulty: self.defaults.difficulty.clone(),
            num: self.defaults.question_count,
        };
        (ticket, request)
    }

    pub fn begin_submit_answers(&mut self) -> Option<(Ticket, SubmitAnswersRequest)> {
        let user_id = self.require_user(Action::SubmitAnswers)?;
        let ticket = self.begin(Action::SubmitAnswers);
        let request = SubmitAnswersRequest {
            user_id,
            topic: self.topic.clone(),
            answers: self.answers.clone(),
        };
        Some((ticket, request))
    }

    pub fn finish_create_user(
        &mut self,
        ticket: Ticket,
        result: Result<CreateUserResponse, BackendError>,
    ) {
        if let Some(resp) = self.settle(ticket, result) {
            self.user_id = resp.user_id.filter(|id| !id.is_empty());
        }
    }

    pub fn finish_generate_plan(
        &mut self,
        ticket: Ticket,
        result: Result<GeneratePlanResponse, BackendError>,
    ) {
        if let Some(resp) = self.settle(ticket, result) {
            if let Some(plan) = Fetched::<StudyPlan>::from_parts(resp.plan, resp.plan_text) {
                self.plan = plan;
            }
        }
    }

    pub fn finish_generate_questions(
        &mut self,
        ticket: Ticket,
        result: Result<GenerateQuestionsResponse, BackendError>,
    ) {
        if let Some(resp) = self.settle(ticket, result) {
            let fetched = Fetched::<Vec<Question>>::from_parts(resp.questions, resp.questions_text);
            if let Some(questions) = fetched {
                self.questions = questions;
            }
        }
    }

    pub fn finish_submit_answers(
        &mut self,
        ticket: Ticket,
        result: Result<SubmitAnswersResponse, BackendError>,
    ) {
        if let Some(resp) = self.settle(ticket, result) {
            let fetched = Fetched::<Evaluation>::from_parts(resp.evaluation, resp.evaluation_text);
            if let Some(evaluation) = fetched {
                self.evaluation = evaluation;
            }
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            profile: &self.profile,
            user_id: self.user_id.as_ref(),
            plan: &self.plan,
            topic: &self.topic,
            questions: &self.questions,
            answers: &self.answers,
            evaluation: &self.evaluation,
            error: self.error.as_deref(),
            loading: self.loading(),
            busy: self.tracker.busy_actions(),
        }
    }

    fn begin(&mut self, action: Action) -> Ticket {
        self.error = None;
        self.tracker.begin(action)
    }

    fn require_user(&mut self, action: Action) -> Option<UserId> {
        match &self.user_id {
            Some(id) => Some(id.clone()),
            None => {
                tracing::debug!("{:?} refused: no user yet", action);
                self.error = Some(CREATE_USER_FIRST.to_string());
                None
            }
        }
    }

    /// Settles the busy mark and unwraps a successful, current outcome.
    fn settle<R>(&mut self, ticket: Ticket, result: Result<R, BackendError>) -> Option<R> {
        if !self.tracker.finish(ticket) {
            tracing::debug!(
                "Dropping stale {:?} completion (token {})",
                ticket.action,
                ticket.token
            );
            return None;
        }

        match result {
            Ok(resp) => Some(resp),
            Err(e) => {
                tracing::warn!("{:?} failed: {}", ticket.action, e);
                self.error = Some(format!("{}: {}", ticket.action.failure_prefix(), e));
                None
            }
        }
    }
}

impl Default for ClientView {
    fn default() -> Self {
        Self::new(PrepDefaults::default())
    }
}
