// src/handlers/mod.rs

pub mod forms;
pub mod page;
