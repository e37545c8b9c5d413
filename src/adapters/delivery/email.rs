//! Email lead delivery - formats and sends the two lead notifications.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::lead::Lead;
use crate::ports::{DeliveryError, EmailMessage, EmailSender, LeadDelivery};

/// Addresses and branding for lead notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadMailerConfig {
    /// Staff inbox that receives every lead.
    pub staff_address: String,
    pub company_name: String,
    /// Shown to the prospect as an alternative contact.
    pub helpline_number: String,
}

/// Delivers a lead as a staff notification followed by a prospect thank-you.
pub struct EmailLeadDelivery {
    sender: Arc<dyn EmailSender>,
    config: LeadMailerConfig,
}

impl EmailLeadDelivery {
    pub fn new(sender: Arc<dyn EmailSender>, config: LeadMailerConfig) -> Self {
        Self { sender, config }
    }

    fn staff_message(&self, lead: &Lead) -> EmailMessage {
        let mut text = format!(
            "New lead for {service}\n\
             \n\
             Name:  {name}\n\
             Phone: {phone}\n\
             Email: {email}\n\
             Received: {at}\n\
             Reference: {id}\n",
            service = lead.service.display_name(),
            name = lead.name,
            phone = lead.phone,
            email = lead.email,
            at = lead.captured_at.format("%Y-%m-%d %H:%M UTC"),
            id = lead.id,
        );
        if !lead.answers.is_empty() {
            text.push_str("\nQualification answers:\n");
            text.push_str(&answer_list(lead));
        }

        EmailMessage::new(
            &self.config.staff_address,
            format!("New {} lead: {}", lead.service.display_name(), lead.name),
            text,
        )
        .with_reply_to(&lead.email)
    }

    fn prospect_message(&self, lead: &Lead) -> EmailMessage {
        let mut text = format!(
            "Hi {name},\n\
             \n\
             Thank you for your interest in our {service} services. \
             Our team will review your requirements and get back to you shortly.\n",
            name = lead.name,
            service = lead.service.display_name(),
        );
        if !lead.answers.is_empty() {
            text.push_str("\nHere is what you told us:\n");
            text.push_str(&answer_list(lead));
        }
        text.push_str(&format!(
            "\nNeed us sooner? Call {}.\n\n{}",
            self.config.helpline_number, self.config.company_name
        ));

        EmailMessage::new(
            &lead.email,
            format!("Thanks for contacting {}", self.config.company_name),
            text,
        )
        .with_reply_to(&self.config.staff_address)
    }
}

fn answer_list(lead: &Lead) -> String {
    lead.answers
        .iter()
        .map(|a| format!("- {}\n  {}\n", a.question, a.answer))
        .collect()
}

#[async_trait]
impl LeadDelivery for EmailLeadDelivery {
    async fn deliver(&self, lead: &Lead) -> Result<(), DeliveryError> {
        self.sender
            .send(self.staff_message(lead))
            .await
            .map_err(DeliveryError::StaffNotification)?;
        self.sender
            .send(self.prospect_message(lead))
            .await
            .map_err(DeliveryError::ProspectNotification)?;

        tracing::info!(lead_id = %lead.id, service = %lead.service, "Lead notifications sent");
        Ok(())
    }
}
