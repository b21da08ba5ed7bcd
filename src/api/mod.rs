//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints for the food donation backend:
//! - Session token endpoints (mint and clear the token cookie)
//! - Food listing endpoints (public browse plus guarded CRUD)
//! - Authentication middleware applied to the protected route group

pub mod auth;
pub mod foods;
pub mod middleware;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// GET / - Liveness probe
async fn health() -> &'static str {
    "Server is running"
}

/// Build the API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Routes that require a valid session token
    let protected_routes = foods::protected_router().route_layer(
        axum_middleware::from_fn_with_state(state.clone(), middleware::require_auth),
    );

    // Public routes
    Router::new()
        .route("/", get(health))
        .merge(auth::router())
        .merge(foods::public_router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    // Browser clients send the token cookie cross-origin, so credentialed
    // CORS with an explicit origin allowlist is required.
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    build_api_router(state.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
