// src/view/tracker.rs

use std::collections::BTreeMap;

use serde::Serialize;

/// The four user-triggered backend exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateUser,
    GeneratePlan,
    GenerateQuestions,
    SubmitAnswers,
}

impl Action {
    /// Banner prefix used when this action's exchange fails.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Action::CreateUser => "Error creating user",
            Action::GeneratePlan => "Error generating plan",
            Action::GenerateQuestions => "Error generating questions",
            Action::SubmitAnswers => "Error submitting answers",
        }
    }

    /// Whether the action needs a backend user identifier first.
    pub fn requires_user(self) -> bool {
        matches!(self, Action::GeneratePlan | Action::SubmitAnswers)
    }
}

/// Proof that a request was started; handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub action: Action,
    pub token: u64,
}

/// Per-action in-flight bookkeeping with monotonically increasing tokens.
///
/// Only the most recent request of an action may complete it. An older
/// request finishing late is reported as stale and leaves the newer
/// request's busy mark alone.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_token: u64,
    in_flight: BTreeMap<Action, u64>,
}

impl RequestTracker {
    pub fn begin(&mut self, action: Action) -> Ticket {
        self.next_token += 1;
        let token = self.next_token;
        self.in_flight.insert(action, token);
        Ticket { action, token }
    }

    /// Clears the action's busy mark if `ticket` is still current.
    /// Returns `false` for a stale ticket.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        match self.in_flight.get(&ticket.action) {
            Some(&current) if current == ticket.token => {
                self.in_flight.remove(&ticket.action);
                true
            }
            _ => false,
        }
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.in_flight.contains_key(&action)
    }

    pub fn any_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn busy_actions(&self) -> Vec<Action> {
        self.in_flight.keys().copied().collect()
    }
}
