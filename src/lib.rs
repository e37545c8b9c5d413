//! Lead Qualifier - webhook fulfilment for sales-lead qualification dialogues
//!
//! An NLU platform posts each user turn to the webhook. The service walks
//! the prospect through a per-service questionnaire, collects contact
//! details, answers free-text questions from site content or a generative
//! model, and hands completed leads to email delivery. All conversation
//! state travels in the platform's contexts; the service keeps none.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
