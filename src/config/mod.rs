//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LEAD_QUALIFIER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use lead_qualifier::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Webhook served at {}", config.server.webhook_path);
//! ```

mod ai;
mod company;
mod database;
mod email;
mod error;
mod features;
mod server;

pub use ai::AiConfig;
pub use company::CompanyConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except the optional `database` and `email`
/// sections, which switch on their adapters when present.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, webhook path)
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini configuration for knowledge answers
    #[serde(default)]
    pub ai: AiConfig,

    /// Site-content database (PostgreSQL)
    pub database: Option<DatabaseConfig>,

    /// Lead notification email (Resend)
    pub email: Option<EmailConfig>,

    /// Company details
    #[serde(default)]
    pub company: CompanyConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LEAD_QUALIFIER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LEAD_QUALIFIER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LEAD_QUALIFIER__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LEAD_QUALIFIER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(email) = &self.email {
            email.validate()?;
        }
        self.company.validate()?;
        if self.is_production() && self.features.verbose_errors {
            return Err(ValidationError::VerboseErrorsInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
