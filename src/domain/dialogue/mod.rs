//! Dialogue - the stateless qualification conversation.
//!
//! Each webhook call carries an intent and the contexts emitted on the
//! previous turn. From those alone the [`IntentRouter`] decides what to do,
//! the [`FlowEngine`] advances the flow, and the resulting [`TurnOutcome`]
//! holds the reply plus the contexts for the next turn.
//!
//! # Module Organization
//!
//! - `context` - context names, lifespans and the inbound context set
//! - `state` / `answers` - typed flow state and its wire encoding
//! - `stage` - flow stages as a state machine
//! - `engine` - question-advance and contact-collection transitions
//! - `router` / `fallback` - intent dispatch and context-only recovery

mod answers;
mod context;
mod engine;
mod errors;
mod fallback;
mod intent;
mod outcome;
mod reply;
mod router;
mod stage;
mod state;

pub use answers::{Answer, Answers};
pub use context::{ActiveContext, ContextName, ContextSet, Parameters, SessionPath};
pub use engine::{
    EmailPolicy, FlowEngine, FlowSettings, EMAIL_PROMPT, INVALID_EMAIL_REPLY, NAME_PROMPT,
    NAME_TOO_SHORT_REPLY, PHONE_TOO_SHORT_REPLY,
};
pub use errors::{ContextError, FlowError};
pub use fallback::FallbackRecovery;
pub use intent::Intent;
pub use outcome::{ExpiryCause, TurnOutcome, SESSION_EXPIRED_REPLY};
pub use reply::{HelplineCard, Reply, RichMessage};
pub use router::{IntentRouter, TurnDecision, TurnRequest};
pub use stage::FlowStage;
pub use state::{ContactCollectionState, ContactStep, FlowContext, QuestionFlowState};
