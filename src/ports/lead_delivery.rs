//! Lead Delivery Port - hands a completed lead to staff and the prospect.

use async_trait::async_trait;

use super::EmailError;
use crate::domain::lead::Lead;

/// Errors that can occur while delivering a lead
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Failed to notify staff: {0}")]
    StaffNotification(#[source] EmailError),

    #[error("Failed to notify prospect: {0}")]
    ProspectNotification(#[source] EmailError),

    #[error("Delivery channel closed")]
    ChannelClosed,
}

/// Port for delivering completed leads
#[async_trait]
pub trait LeadDelivery: Send + Sync {
    /// Deliver a lead. Called from a background task.
    async fn deliver(&self, lead: &Lead) -> Result<(), DeliveryError>;
}
