//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary and the state machine trait
//! used across the dialogue domain.

mod errors;
mod state_machine;

pub use errors::{ErrorCode, ValidationError};
pub use state_machine::StateMachine;
