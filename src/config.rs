// src/config.rs

use std::{env, fmt, net::SocketAddr};

use chrono::NaiveDate;
use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:1234";
pub const DEFAULT_SYLLABUS: &str = "Discrete Mathematics, Data Structures, Algorithms";
pub const DEFAULT_TOPIC: &str = "Dynamic Programming";

/// Fixed parameters sent with plan and question requests.
/// The page never edits them; they only change through the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepDefaults {
    pub exam_date: NaiveDate,
    pub daily_hours: u32,
    pub difficulty: String,
    pub question_count: u32,
    pub syllabus: String,
    pub topic: String,
}

impl Default for PrepDefaults {
    fn default() -> Self {
        Self {
            exam_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap_or_default(),
            daily_hours: 2,
            difficulty: "medium".to_string(),
            question_count: 5,
            syllabus: DEFAULT_SYLLABUS.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    pub defaults: PrepDefaults,
}

/// A variable was set but could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.var, self.reason)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fallback = PrepDefaults::default();

        let api_base_url = parse_var(&lookup, "API_BASE_URL", DEFAULT_API_BASE_URL, |v| {
            Url::parse(v).map_err(|e| e.to_string())
        })?;

        let bind_addr = parse_var(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR, |v| {
            v.parse::<SocketAddr>().map_err(|e| e.to_string())
        })?;

        let exam_date = match lookup("EXAM_DATE") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                ConfigError {
                    var: "EXAM_DATE",
                    reason: e.to_string(),
                }
            })?,
            None => fallback.exam_date,
        };

        let daily_hours = parse_var(&lookup, "DAILY_HOURS", "2", |v| {
            v.parse::<u32>().map_err(|e| e.to_string())
        })?;

        let question_count = parse_var(&lookup, "QUESTION_COUNT", "5", |v| {
            v.parse::<u32>().map_err(|e| e.to_string())
        })?;

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        Ok(Self {
            api_base_url,
            bind_addr,
            rust_log,
            log_dir,
            defaults: PrepDefaults {
                exam_date,
                daily_hours,
                difficulty: lookup("QUESTION_DIFFICULTY").unwrap_or(fallback.difficulty),
                question_count,
                syllabus: lookup("DEFAULT_SYLLABUS").unwrap_or(fallback.syllabus),
                topic: lookup("DEFAULT_TOPIC").unwrap_or(fallback.topic),
            },
        })
    }
}

fn parse_var<F, T, P>(lookup: &F, var: &'static str, default: &str, parse: P) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    parse(raw.trim()).map_err(|reason| ConfigError { var, reason })
}
