//! Channel-backed lead delivery.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::lead::Lead;
use crate::ports::{DeliveryError, LeadDelivery};

/// Sends each delivered lead into an unbounded channel.
///
/// Lets tests observe background delivery without an email transport.
#[derive(Debug, Clone)]
pub struct ChannelLeadDelivery {
    tx: mpsc::UnboundedSender<Lead>,
}

impl ChannelLeadDelivery {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Lead>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl LeadDelivery for ChannelLeadDelivery {
    async fn deliver(&self, lead: &Lead) -> Result<(), DeliveryError> {
        self.tx
            .send(lead.clone())
            .map_err(|_| DeliveryError::ChannelClosed)
    }
}
