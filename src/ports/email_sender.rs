//! Email Sender Port - Interface for transactional email delivery.

use async_trait::async_trait;

/// Errors that can occur while sending email
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Email transport rejected the message: {status} {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

/// A single outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    pub reply_to: Option<String>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            reply_to: None,
        }
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }
}

/// Port for sending email
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one message.
    ///
    /// # Errors
    /// Returns `EmailError` if the transport refuses or cannot be reached
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}
