// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use exam_prep_client::backend::HttpBackend;
use exam_prep_client::config::Config;
use exam_prep_client::routes;
use exam_prep_client::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e));

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "client.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let backend = HttpBackend::new(config.api_base_url.clone())
        .unwrap_or_else(|e| panic!("Failed to build HTTP client: {}", e));
    tracing::info!("Using exam-prep backend at {}", backend.base_url());

    let state = AppState::new(config.defaults.clone(), Arc::new(backend));
    let app = routes::create_router(state);

    tracing::info!("Serving AI Exam Prep on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", config.bind_addr, e));

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
