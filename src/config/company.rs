//! Company details shown to prospects

use serde::Deserialize;

use super::error::ValidationError;

/// Company facts used by the helpline reply, the knowledge prompt and
/// outgoing emails.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// One paragraph, quoted verbatim in the knowledge prompt
    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_helpline_number")]
    pub helpline_number: String,

    #[serde(default = "default_whatsapp_link")]
    pub whatsapp_link: String,
}

impl CompanyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("COMPANY__NAME"));
        }
        if self.helpline_number.trim().is_empty() {
            return Err(ValidationError::MissingRequired("COMPANY__HELPLINE_NUMBER"));
        }
        if !self.whatsapp_link.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("company.whatsapp_link"));
        }
        Ok(())
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            helpline_number: default_helpline_number(),
            whatsapp_link: default_whatsapp_link(),
        }
    }
}

fn default_name() -> String {
    "Softcodix".to_string()
}

fn default_description() -> String {
    "Softcodix is a software house offering website development, mobile app development, \
     digital marketing, AI chatbots and graphic design for businesses of every size."
        .to_string()
}

fn default_helpline_number() -> String {
    "02138899998".to_string()
}

fn default_whatsapp_link() -> String {
    "https://wa.me/923151179953".to_string()
}
