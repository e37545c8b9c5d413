//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Knowledge Ports
//!
//! - `KnowledgeResponder` - Answers questions outside the qualification flow
//! - `ContentStore` - Substring lookup over scraped site pages
//! - `AIProvider` - Generative answers to single questions
//!
//! ## Delivery Ports
//!
//! - `LeadDelivery` - Notifies staff and prospect of a completed lead
//! - `EmailSender` - Transactional email transport

mod ai_provider;
mod content_store;
mod email_sender;
mod knowledge_responder;
mod lead_delivery;

pub use ai_provider::{AIError, AIProvider, GeneratedText, PromptRequest, PromptTrace};
pub use content_store::{ContentStore, ContentStoreError, PageContent};
pub use email_sender::{EmailError, EmailMessage, EmailSender};
pub use knowledge_responder::KnowledgeResponder;
pub use lead_delivery::{DeliveryError, LeadDelivery};
