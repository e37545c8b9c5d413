//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum webhook endpoint
//! - `ai` - Generative text providers (Gemini, mock)
//! - `content` - Site content lookup (PostgreSQL, in-memory)
//! - `knowledge` - Content-first knowledge responder
//! - `email` - Transactional email transports
//! - `delivery` - Lead delivery (email, channel)

pub mod ai;
pub mod content;
pub mod delivery;
pub mod email;
pub mod http;
pub mod knowledge;
