//! HTTP adapter for the fulfilment webhook.
//!
//! - `POST /webhook` - one conversational turn (path configurable)
//! - `GET /health` - liveness probe

pub mod dto;
mod handlers;
mod routes;

pub use dto::{ContextDto, WebhookRequest, WebhookResponse};
pub use handlers::{WebhookApiError, WebhookAppState};
pub use routes::webhook_router;
