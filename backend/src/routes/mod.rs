//! Route definitions for the NexusKart API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod newsletter;
mod orders;
mod products;
mod reviews;
mod stats;
mod users;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use newsletter::newsletter_routes;
pub use orders::order_routes;
pub use products::product_routes;
pub use stats::stats_routes;
pub use users::user_routes;

/// Upper bound on request bodies; product images arrive inline
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "NexusKart API v1" }))
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/newsletter", newsletter_routes())
        .nest("/statistics", stats_routes())
        .nest("/users", user_routes())
}
