//! Feature flags configuration

use serde::Deserialize;

use crate::domain::dialogue::EmailPolicy;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Re-prompt for an email without `@` instead of acknowledging it
    #[serde(default = "default_strict_email_validation")]
    pub strict_email_validation: bool,

    /// Show parser detail in 400 bodies (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl FeatureFlags {
    pub fn email_policy(&self) -> EmailPolicy {
        if self.strict_email_validation {
            EmailPolicy::RejectInvalid
        } else {
            EmailPolicy::AcknowledgeAlways
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            strict_email_validation: default_strict_email_validation(),
            verbose_errors: false,
        }
    }
}

fn default_strict_email_validation() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.strict_email_validation);
        assert!(!flags.verbose_errors);
        assert_eq!(flags.email_policy(), EmailPolicy::RejectInvalid);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "strict_email_validation": false,
            "verbose_errors": true
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(flags.verbose_errors);
        assert_eq!(flags.email_policy(), EmailPolicy::AcknowledgeAlways);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert!(flags.strict_email_validation);
    }
}
