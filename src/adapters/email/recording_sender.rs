//! In-memory email sender for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{EmailError, EmailMessage, EmailSender};

/// Records every message; optionally fails sends to one recipient.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail_for: Option<String>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects messages addressed to `recipient`.
    pub fn failing_for(recipient: impl Into<String>) -> Self {
        Self {
            fail_for: Some(recipient.into()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EmailMessage>> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.fail_for.as_deref() == Some(message.to.as_str()) {
            return Err(EmailError::Rejected {
                status: 422,
                message: format!("recipient {} rejected", message.to),
            });
        }
        self.lock().push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_messages_and_rejects_configured_recipient() {
        let sender = RecordingEmailSender::failing_for("bad@example.com");

        sender
            .send(EmailMessage::new("ok@example.com", "Hi", "Body"))
            .await
            .unwrap();
        let err = sender
            .send(EmailMessage::new("bad@example.com", "Hi", "Body"))
            .await
            .unwrap_err();

        assert!(matches!(err, EmailError::Rejected { status: 422, .. }));
        assert_eq!(sender.sent().len(), 1);
        assert_eq!(sender.sent()[0].to, "ok@example.com");
    }
}
