//! Configuration error types

use thiserror::Error;

/// Failure to build an `AppConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A configuration value that loaded but cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind host: '{0}'")]
    InvalidHost(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Timeout must be a positive number of seconds within range")]
    InvalidTimeout,

    #[error("Webhook path must start with '/' and not shadow /health: '{0}'")]
    InvalidWebhookPath(String),

    #[error("AI timeout must be between 1 and 60 seconds")]
    InvalidAiTimeout,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Database pool size {0} is outside 1..=20")]
    InvalidPoolSize(u32),

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Invalid staff notification address")]
    InvalidStaffEmail,

    #[error("Verbose errors must be disabled in production")]
    VerboseErrorsInProduction,
}
