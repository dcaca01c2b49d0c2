// src/models/user.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier handed out by the backend.
/// Echoed back exactly as received, number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    /// `0` and `""` are falsy ids; the backend uses them for "no user".
    pub fn is_empty(&self) -> bool {
        match self {
            UserId::Number(n) => *n == 0,
            UserId::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Profile fields as typed into the page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// Comma-separated topic list.
    pub syllabus: String,
}

/// Body of `POST /user`.
pub type CreateUserRequest = UserProfile;

/// Success body of `POST /user`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserResponse {
    #[serde(default)]
    pub user_id: Option<UserId>,
}
