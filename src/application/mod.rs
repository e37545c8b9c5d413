//! Application layer - orchestrates the domain and the ports.
//!
//! - `HandleTurnHandler` - one webhook turn: route, answer, dispatch
//! - `LeadDispatcher` - background delivery of completed leads

pub mod handlers;
mod lead_dispatcher;

pub use handlers::HandleTurnHandler;
pub use lead_dispatcher::LeadDispatcher;
