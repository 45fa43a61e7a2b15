//! HTTP router assembly

use crate::auth::{api as auth_api, auth_middleware, AuthState};
use crate::middleware::request_logging;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Upper bound on handling a single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the full application router
pub fn build_router(auth_state: AuthState) -> Router {
    // Protected routes
    let protected_routes = Router::new()
        .route("/me", get(auth_api::get_current_user))
        .route_layer(middleware::from_fn_with_state(
            auth_state.codec.clone(),
            auth_middleware,
        ))
        .with_state(auth_state.clone());

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(auth_api::health))
        .route("/signup", post(auth_api::signup))
        .route("/login", post(auth_api::login))
        .with_state(auth_state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
}
