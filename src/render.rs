// src/render.rs

//! HTML for the page and its three result areas.
//!
//! Each result area is rendered from its [`Fetched`] value first, so the
//! structured/text/absent precedence lives in one `match` per section.

use askama::Template;

use crate::{
    models::{Fetched, evaluation::Evaluation, plan::DayEntry, plan::StudyPlan, question::Question},
    view::{Action, ClientView},
};

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    error: &'a str,
    loading: bool,
    name: &'a str,
    email: &'a str,
    syllabus: &'a str,
    user_id: String,
    topic: &'a str,
    answers_draft: &'a str,
    can_create_user: bool,
    can_generate_plan: bool,
    can_generate_questions: bool,
    can_submit_answers: bool,
    plan_html: String,
    questions_html: String,
    evaluation_html: String,
}

#[derive(Template)]
#[template(path = "plan.html")]
struct StudyPlanTemplate<'a> {
    show_tips: bool,
    tips: &'a [String],
    days: &'a [DayEntry],
}

#[derive(Template)]
#[template(path = "questions.html")]
struct QuestionsTemplate<'a> {
    questions: &'a [Question],
}

#[derive(Template)]
#[template(path = "evaluation.html")]
struct EvaluationTemplate<'a> {
    evaluation: &'a Evaluation,
    show_weak: bool,
    weak_subtopics: &'a [String],
}

/// Plain-text fallback, escaped but otherwise verbatim.
#[derive(Template)]
#[template(source = "{{ text }}", ext = "html")]
struct TextTemplate<'a> {
    text: &'a str,
}

pub fn render_page(view: &ClientView) -> askama::Result<String> {
    PageTemplate {
        error: view.error.as_deref().unwrap_or_default(),
        loading: view.loading(),
        name: &view.profile.name,
        email: &view.profile.email,
        syllabus: &view.profile.syllabus,
        user_id: view
            .user_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        topic: &view.topic,
        answers_draft: &view.answers_draft,
        can_create_user: view.can_trigger(Action::CreateUser),
        can_generate_plan: view.can_trigger(Action::GeneratePlan),
        can_generate_questions: view.can_trigger(Action::GenerateQuestions),
        can_submit_answers: view.can_trigger(Action::SubmitAnswers),
        plan_html: render_plan(&view.plan)?,
        questions_html: render_questions(&view.questions)?,
        evaluation_html: render_evaluation(&view.evaluation)?,
    }
    .render()
}

pub fn render_plan(plan: &Fetched<StudyPlan>) -> askama::Result<String> {
    match plan {
        Fetched::Structured(plan) => StudyPlanTemplate {
            show_tips: plan.tips.is_some(),
            tips: plan.tips.as_deref().unwrap_or_default(),
            days: &plan.plan,
        }
        .render(),
        Fetched::Text(text) => render_text(text),
        Fetched::Absent => Ok(String::new()),
    }
}

pub fn render_questions(questions: &Fetched<Vec<Question>>) -> askama::Result<String> {
    match questions {
        Fetched::Structured(questions) => QuestionsTemplate { questions }.render(),
        Fetched::Text(text) => render_text(text),
        Fetched::Absent => Ok(String::new()),
    }
}

pub fn render_evaluation(evaluation: &Fetched<Evaluation>) -> askama::Result<String> {
    match evaluation {
        Fetched::Structured(evaluation) => EvaluationTemplate {
            evaluation,
            show_weak: evaluation.weak_subtopics.is_some(),
            weak_subtopics: evaluation.weak_subtopics.as_deref().unwrap_or_default(),
        }
        .render(),
        Fetched::Text(text) => render_text(text),
        Fetched::Absent => Ok(String::new()),
    }
}

fn render_text(text: &str) -> askama::Result<String> {
    TextTemplate { text }.render()
}
