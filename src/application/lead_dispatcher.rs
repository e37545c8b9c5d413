//! LeadDispatcher - hands completed leads to delivery off the request path.
//!
//! Delivery runs as a detached task: no retry, no confirmation back to the
//! prospect, who has already been thanked. Failures are only logged.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::lead::{Lead, LeadError};
use crate::ports::LeadDelivery;

/// Validates leads and spawns their delivery.
#[derive(Clone)]
pub struct LeadDispatcher {
    delivery: Arc<dyn LeadDelivery>,
}

impl LeadDispatcher {
    pub fn new(delivery: Arc<dyn LeadDelivery>) -> Self {
        Self { delivery }
    }

    /// Validates `lead` and starts delivering it in the background.
    ///
    /// An invalid lead is not delivered. The returned handle may be dropped;
    /// the task keeps running.
    pub fn dispatch(&self, lead: Lead) -> Result<JoinHandle<()>, LeadError> {
        lead.validate()?;

        let delivery = Arc::clone(&self.delivery);
        Ok(tokio::spawn(async move {
            match delivery.deliver(&lead).await {
                Ok(()) => tracing::info!(
                    lead_id = %lead.id,
                    service = %lead.service,
                    "Lead delivered"
                ),
                Err(e) => tracing::error!(
                    lead_id = %lead.id,
                    service = %lead.service,
                    error = %e,
                    "Lead delivery failed"
                ),
            }
        }))
    }
}
