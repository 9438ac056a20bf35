//! API module
//!
//! HTTP API endpoints, response envelope and middleware.

pub mod envelope;
pub mod middleware;
pub mod routes;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use envelope::{ApiResponse, Envelope, ResponseCode};
pub use routes::{create_router, AppState};

/// Build the complete application: health check, event routes and
/// middleware, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    // Layers run in reverse order of addition:
    // trace -> cors -> request context -> logging -> handler
    Router::new()
        .route("/health", get(routes::health_check))
        .nest("/api/events", create_router())
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::request_context_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
