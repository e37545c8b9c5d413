//! Service Catalog - static qualification scripts.
//!
//! Each of the five service categories has an ordered list of qualification
//! questions and a set of detection keywords. The catalog is built once on
//! first access and never mutated afterwards.

mod service;

pub use service::{ServiceDefinition, ServiceId};

use once_cell::sync::Lazy;

static CATALOG: Lazy<ServiceCatalog> = Lazy::new(|| {
    ServiceCatalog {
        services: vec![
            ServiceDefinition::new(
                ServiceId::Website,
                &[
                    "What type of website do you need (business, e-commerce, portfolio, blog)?",
                    "Do you already have a domain name and hosting?",
                    "Roughly how many pages or sections should the website have?",
                    "Do you have a reference website whose style you like?",
                    "What is your expected budget and timeline?",
                ],
                &[
                    "website",
                    "web site",
                    "webpage",
                    "web page",
                    "web development",
                    "landing page",
                    "ecommerce",
                    "e commerce",
                    "online store",
                    "wordpress",
                    "shopify",
                ],
            ),
            ServiceDefinition::new(
                ServiceId::MobileApp,
                &[
                    "Which platforms should the app support (Android, iOS or both)?",
                    "What is the main purpose of the app?",
                    "Which key features do you need (login, payments, chat, maps)?",
                    "Do you already have designs or wireframes for the app?",
                    "What is your expected budget and timeline?",
                ],
                &[
                    "mobile app",
                    "mobile application",
                    "app",
                    "application",
                    "android",
                    "ios",
                    "iphone",
                    "flutter",
                    "react native",
                ],
            ),
            ServiceDefinition::new(
                ServiceId::Marketing,
                &[
                    "Which marketing services are you interested in (SEO, social media, paid ads)?",
                    "Which platforms is your business currently active on?",
                    "Who is your target audience?",
                    "What is your monthly marketing budget?",
                ],
                &[
                    "marketing",
                    "digital marketing",
                    "seo",
                    "social media",
                    "facebook ads",
                    "google ads",
                    "ads",
                    "advertising",
                    "promotion",
                    "branding campaign",
                ],
            ),
            ServiceDefinition::new(
                ServiceId::Chatbot,
                &[
                    "Where should the chatbot run (website, WhatsApp, Facebook, Instagram)?",
                    "What should the chatbot handle (support, sales, bookings, FAQs)?",
                    "Which languages should the chatbot speak?",
                    "Does it need to connect to an existing system such as a CRM?",
                ],
                &[
                    "chatbot",
                    "chat bot",
                    "bot",
                    "ai assistant",
                    "virtual assistant",
                    "whatsapp bot",
                    "automation",
                ],
            ),
            ServiceDefinition::new(
                ServiceId::Design,
                &[
                    "What do you need designed (logo, brand identity, social posts, UI)?",
                    "Do you have brand colours or a style guide already?",
                    "How many design concepts or revisions do you expect?",
                    "Which file formats do you need delivered (PNG, SVG, PDF, AI)?",
                ],
                &[
                    "design",
                    "graphic design",
                    "graphics",
                    "logo",
                    "branding",
                    "brand identity",
                    "ui ux",
                    "poster",
                    "banner",
                ],
            ),
        ],
    }
});

/// Read-only view over every service definition, in catalog order.
#[derive(Debug)]
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
}

impl ServiceCatalog {
    /// The process-wide catalog.
    pub fn global() -> &'static ServiceCatalog {
        &CATALOG
    }

    /// Definition for a service. Every [`ServiceId`] has exactly one.
    pub fn get(&self, id: ServiceId) -> &ServiceDefinition {
        self.services
            .iter()
            .find(|def| def.id == id)
            .unwrap_or_else(|| unreachable!("catalog defines every ServiceId"))
    }

    /// Services in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.iter()
    }

    /// First service (in catalog order) whose keywords occur in the utterance.
    pub fn detect(&self, utterance: &str) -> Option<ServiceId> {
        self.services
            .iter()
            .find(|def| def.matches(utterance))
            .map(|def| def.id)
    }

    /// Bullet list of service display names, for prompts.
    pub fn service_list(&self) -> String {
        self.services
            .iter()
            .map(|def| format!("- {}", def.id.display_name()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
