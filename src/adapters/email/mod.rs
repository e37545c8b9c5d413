//! Email Sender Adapters.
//!
//! - `ResendEmailSender` - Resend REST API
//! - `LoggingEmailSender` - logs messages instead of sending (email unconfigured)
//! - `RecordingEmailSender` - keeps messages in memory for tests

mod logging_sender;
mod recording_sender;
mod resend_sender;

pub use logging_sender::LoggingEmailSender;
pub use recording_sender::RecordingEmailSender;
pub use resend_sender::{ResendConfig, ResendEmailSender};
