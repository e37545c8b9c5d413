//! Application handlers.
//!
//! Each handler orchestrates domain logic and ports for one use case.

mod handle_turn;

pub use handle_turn::HandleTurnHandler;
