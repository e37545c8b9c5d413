//! Email sender that only logs.

use async_trait::async_trait;

use crate::ports::{EmailError, EmailMessage, EmailSender};

/// Logs each message at `info` and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Email delivery not configured, message not sent"
        );
        Ok(())
    }
}
