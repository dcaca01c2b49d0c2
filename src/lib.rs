// src/lib.rs

pub mod actions;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
pub mod view;

pub use routes::create_router;
