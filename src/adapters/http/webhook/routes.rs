//! Axum router for the fulfilment webhook.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{fulfill, health, method_not_allowed, WebhookAppState};

/// Creates the webhook router.
///
/// # Routes
/// - `POST {webhook_path}` - fulfil one turn; other methods get 405
/// - `GET /health` - liveness probe
pub fn webhook_router(state: WebhookAppState, webhook_path: &str, request_timeout: Duration) -> Router {
    Router::new()
        .route(webhook_path, post(fulfill).fallback(method_not_allowed))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
