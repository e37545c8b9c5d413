//! HTTP adapters - the webhook surface.

pub mod webhook;

pub use webhook::{webhook_router, WebhookAppState};
