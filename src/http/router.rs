//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Expense CRUD
        .route("/expenses", get(handlers::list_expenses))
        .route("/expenses", post(handlers::record_expenses))
        .route("/expenses/{expense_id}", get(handlers::get_expense))
        .route("/expenses/{expense_id}", put(handlers::update_expense))
        .route(
            "/expenses/{expense_id}",
            axum::routing::delete(handlers::delete_expense),
        )
        // Balance
        .route("/balance", get(handlers::get_balance))
        .route("/balance/deposits", post(handlers::add_funds))
        // Roster & duty
        .route("/roster", get(handlers::get_roster))
        .route("/roster", put(handlers::set_roster))
        .route("/duty", get(handlers::get_duty))
        // Dashboard, items, suggestions
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/items", get(handlers::list_items))
        .route("/suggestions", post(handlers::suggest_item));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
