//! Instructions sent with every knowledge question.

use crate::domain::catalog::ServiceCatalog;

/// Sales-assistant persona, company facts and the service list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgePrompt {
    pub company_name: String,
    pub company_description: String,
    /// One `- Service` line per offering.
    pub services: String,
}

impl KnowledgePrompt {
    pub fn new(
        company_name: impl Into<String>,
        company_description: impl Into<String>,
        services: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            company_description: company_description.into(),
            services: services.into(),
        }
    }

    /// Uses the catalog's display names as the service list.
    pub fn from_catalog(
        company_name: impl Into<String>,
        company_description: impl Into<String>,
        catalog: &ServiceCatalog,
    ) -> Self {
        Self::new(company_name, company_description, catalog.service_list())
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are a friendly sales agent for **{name}**.\n\
             \n\
             RULES:\n\
             - Always reply in the same language as the user's message (English or Roman Urdu).\n\
             - If the user writes Urdu, reply in Roman Urdu (English alphabet only).\n\
             - Keep answers short (3-5 lines).\n\
             - Be professional but friendly, like chatting on WhatsApp.\n\
             - Do NOT always start with greetings.\n\
             - If the question is about services, explain briefly with 2-3 bullet points.\n\
             - End with a small call-to-action (e.g. \"Would you like more details?\" or \"Shall I connect you to our team?\").\n\
             \n\
             Company Info:\n\
             {description}\n\
             \n\
             Our Services:\n\
             {services}",
            name = self.company_name,
            description = self.company_description,
            services = self.services,
        )
    }
}
