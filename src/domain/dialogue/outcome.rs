//! Result of handling one turn.

use super::context::ActiveContext;
use super::errors::{ContextError, FlowError};
use super::reply::Reply;
use super::stage::FlowStage;
use crate::domain::lead::Lead;

/// Fixed apology when a stateful intent arrives without its context.
pub const SESSION_EXPIRED_REPLY: &str =
    "⚠️ Your session has expired. Please start again by telling us which service you're interested in.";

/// Why a turn dead-ended with the session-expired reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpiryCause {
    /// The intent needs a context the caller did not send (or sent expired).
    MissingContext,
    /// The context was present but could not be decoded.
    Undecodable(ContextError),
    /// The decoded state could not be advanced.
    Corrupt(FlowError),
}

/// Reply plus the contexts to hand back for the next turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub reply: Reply,
    /// Contexts to emit. Zero-lifespan entries tell the caller to drop them.
    pub contexts: Vec<ActiveContext>,
    pub stage: FlowStage,
    /// Set only on the turn that completes a flow.
    pub lead: Option<Lead>,
    /// Set only on session-expired outcomes.
    pub expired: Option<ExpiryCause>,
}

impl TurnOutcome {
    /// A reply that leaves the caller's contexts untouched.
    pub fn informational(reply: Reply) -> Self {
        Self {
            reply,
            contexts: Vec::new(),
            stage: FlowStage::Idle,
            lead: None,
            expired: None,
        }
    }

    pub fn session_expired(cause: ExpiryCause) -> Self {
        Self {
            expired: Some(cause),
            ..Self::informational(Reply::text(SESSION_EXPIRED_REPLY))
        }
    }

    pub fn is_session_expired(&self) -> bool {
        self.expired.is_some()
    }
}
