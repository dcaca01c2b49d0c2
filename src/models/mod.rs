// src/models/mod.rs

pub mod evaluation;
pub mod fetched;
pub mod plan;
pub mod question;
pub mod user;

pub use fetched::Fetched;
