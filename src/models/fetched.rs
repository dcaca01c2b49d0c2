// src/models/fetched.rs

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A backend result that arrives either as a parsed object or as plain text.
///
/// Rendering precedence follows the variant order: a structured value wins,
/// text is the fallback, `Absent` renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Fetched<T> {
    Absent,
    Structured(T),
    Text(String),
}

impl<T> Default for Fetched<T> {
    fn default() -> Self {
        Fetched::Absent
    }
}

impl<T> Fetched<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Fetched::Absent)
    }

    pub fn structured(&self) -> Option<&T> {
        match self {
            Fetched::Structured(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: DeserializeOwned> Fetched<T> {
    /// Picks the representation carried by one response.
    ///
    /// Returns `None` when the response carries neither a structured value
    /// nor non-empty text, so the caller keeps its previous result.
    pub fn from_parts(structured: Option<Value>, text: Option<String>) -> Option<Self> {
        let text = text.filter(|t| !t.is_empty());

        if let Some(value) = structured.filter(|v| !v.is_null()) {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(parsed) => return Some(Fetched::Structured(parsed)),
                Err(e) => {
                    tracing::debug!("Structured result did not match expected shape: {}", e);
                    if text.is_none() {
                        return Some(Fetched::Text(value.to_string()));
                    }
                }
            }
        }

        text.map(Fetched::Text)
    }
}
