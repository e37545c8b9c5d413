//! HTTP handlers for the fulfilment webhook.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use crate::application::HandleTurnHandler;
use crate::domain::dialogue::TurnRequest;

use super::dto::{ErrorResponse, WebhookRequest, WebhookResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WebhookAppState {
    pub turn_handler: Arc<HandleTurnHandler>,
    /// Include the parser message in 400 bodies.
    pub verbose_errors: bool,
}

impl WebhookAppState {
    pub fn new(turn_handler: Arc<HandleTurnHandler>, verbose_errors: bool) -> Self {
        Self {
            turn_handler,
            verbose_errors,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /webhook - fulfil one turn.
pub async fn fulfill(
    State(state): State<WebhookAppState>,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<Json<WebhookResponse>, WebhookApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(status = %rejection.status(), error = %rejection.body_text(), "Rejected webhook body");
        let detail = state.verbose_errors.then(|| rejection.body_text());
        WebhookApiError::MalformedRequest { detail }
    })?;

    let outcome = state.turn_handler.handle(TurnRequest::from(request)).await;
    Ok(Json(WebhookResponse::from(outcome)))
}

/// Any non-POST method on the webhook path.
pub async fn method_not_allowed() -> WebhookApiError {
    WebhookApiError::MethodNotAllowed
}

/// GET /health - liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Webhook failures that never reach the dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookApiError {
    MalformedRequest { detail: Option<String> },
    MethodNotAllowed,
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            WebhookApiError::MalformedRequest { detail } => {
                let error = ErrorResponse::malformed_request("Request body is not a valid webhook request");
                let error = match detail {
                    Some(detail) => error.with_details(detail),
                    None => error,
                };
                (StatusCode::BAD_REQUEST, error)
            }
            WebhookApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, ErrorResponse::method_not_allowed())
            }
        };
        (status, Json(error.into_envelope())).into_response()
    }
}
