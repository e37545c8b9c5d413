//! Lead - a fully qualified prospect ready for delivery.
//!
//! A lead is built once all three contact fields are present. It is handed
//! to delivery and then dropped; nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::catalog::ServiceId;
use crate::domain::dialogue::Answers;

/// Used when a flow completes without a name on record.
pub const UNKNOWN_NAME: &str = "Guest User";

/// Used when a flow completes without a phone number on record.
pub const UNKNOWN_PHONE: &str = "Not provided";

/// Unique identifier for a lead, used to correlate delivery logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(Uuid);

impl LeadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LeadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reasons a completed lead is not delivered.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LeadError {
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Lead is missing {0}")]
    MissingField(&'static str),
}

/// Minimal plausibility check: an `@` somewhere in the address.
pub fn is_plausible_email(email: &str) -> bool {
    email.contains('@')
}

/// Terminal record of a completed qualification flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: LeadId,
    pub service: ServiceId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub answers: Answers,
    pub captured_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(
        service: ServiceId,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        answers: Answers,
    ) -> Self {
        Self {
            id: LeadId::new(),
            service,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            answers,
            captured_at: Utc::now(),
        }
    }

    /// Checks the lead is worth delivering.
    pub fn validate(&self) -> Result<(), LeadError> {
        if self.name.trim().is_empty() {
            return Err(LeadError::MissingField("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(LeadError::MissingField("phone"));
        }
        if !is_plausible_email(&self.email) {
            return Err(LeadError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(email: &str) -> Lead {
        Lead::new(ServiceId::Website, "Ali", "03001234567", email, Answers::new())
    }

    #[test]
    fn valid_lead_passes() {
        assert_eq!(lead("ali@example.com").validate(), Ok(()));
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        assert_eq!(
            lead("not-an-email").validate(),
            Err(LeadError::InvalidEmail("not-an-email".to_string()))
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut lead = lead("a@b.c");
        lead.name = "  ".to_string();
        assert_eq!(lead.validate(), Err(LeadError::MissingField("name")));
    }

    #[test]
    fn every_lead_gets_its_own_id() {
        assert_ne!(lead("a@b.c").id, lead("a@b.c").id);
    }
}
