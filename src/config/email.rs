//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
///
/// Optional as a whole: without it completed leads are logged, not mailed.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Inbox that receives new-lead notifications
    #[serde(default = "default_staff_email")]
    pub staff_email: String,

    /// Resend API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"));
        }
        if !self.resend_api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if !self.staff_email.contains('@') {
            return Err(ValidationError::InvalidStaffEmail);
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidUrl("email.base_url"));
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            staff_email: default_staff_email(),
            base_url: default_base_url(),
        }
    }
}

fn default_from_email() -> String {
    "leads@softcodix.com".to_string()
}

fn default_from_name() -> String {
    "Softcodix".to_string()
}

fn default_staff_email() -> String {
    "sales@softcodix.com".to_string()
}

fn default_base_url() -> String {
    "https://api.resend.com".to_string()
}
