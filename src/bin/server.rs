//! Hearth HTTP Server Binary
//!
//! This is the main entry point for the Hearth REST API server. It
//! initializes the repository, configures the duty calculator, sets up the
//! HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the local (in-memory) repository (default)
//! cargo run --bin hearth-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Store backend selector (default: local)
//! - `DUTY_POLICY`: Rotation policy: round-robin | three-way-handoff |
//!   fixed-weekday (default: round-robin)
//! - `DUTY_ANCHOR`: Rotation anchor date, YYYY-MM-DD (default: 2024-01-01)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hearth_rust::db;
use hearth_rust::duty::{default_anchor, DutyCalculator, RotationPolicy};
use hearth_rust::http::{create_router, AppState};
use hearth_rust::services::suggestion::HistorySuggester;

fn calculator_from_env() -> anyhow::Result<DutyCalculator> {
    let policy = match env::var("DUTY_POLICY") {
        Ok(raw) => raw
            .parse::<RotationPolicy>()
            .map_err(anyhow::Error::msg)?,
        Err(_) => RotationPolicy::default(),
    };

    let anchor = match env::var("DUTY_ANCHOR") {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid DUTY_ANCHOR: {}", e))?,
        Err(_) => default_anchor(),
    };

    Ok(DutyCalculator::new(policy, anchor))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Hearth HTTP Server");

    // Initialize global repository once and reuse it across the app
    db::init_repository().map_err(|e| anyhow::anyhow!(e))?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    let calculator = calculator_from_env()?;
    info!(
        "Duty rotation: {:?} anchored at {}",
        calculator.policy(),
        calculator.anchor()
    );

    // Create application state
    let state = AppState::new(
        repository,
        Arc::new(calculator),
        Arc::new(HistorySuggester::new()),
    );

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
