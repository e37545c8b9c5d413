//! Intent Router - picks the handler for a turn.
//!
//! Routing is a pure function of the request. Knowledge questions are
//! returned as a decision rather than answered here, since answering them
//! needs I/O.

use super::context::{ActiveContext, ContextSet, Parameters, SessionPath};
use super::engine::FlowEngine;
use super::fallback::FallbackRecovery;
use super::intent::Intent;
use super::outcome::{ExpiryCause, TurnOutcome};

/// One inbound turn, already parsed off the wire.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub session: SessionPath,
    pub utterance: String,
    pub intent: Intent,
    /// Slot values extracted by the platform. Flow state never comes from
    /// here; it is carried in the contexts.
    pub parameters: Parameters,
    pub contexts: ContextSet,
}

/// What the router decided for a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnDecision {
    /// The reply is ready.
    Respond(TurnOutcome),
    /// Answer the utterance with the knowledge responder; contexts untouched.
    AskKnowledge { utterance: String },
}

/// Maps intents and active contexts onto flow transitions.
#[derive(Debug, Clone)]
pub struct IntentRouter {
    engine: FlowEngine,
}

impl IntentRouter {
    pub fn new(engine: FlowEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &FlowEngine {
        &self.engine
    }

    pub fn route(&self, request: &TurnRequest) -> TurnDecision {
        let contexts = &request.contexts;

        match &request.intent {
            Intent::Begin(service) => match contexts.find_active_service() {
                // Another flow is mid-way: the utterance answers its question.
                Some((active, _)) if active != *service => self.recover(request),
                _ => TurnDecision::Respond(self.engine.begin(&request.session, *service, contexts)),
            },

            Intent::AnswerQuestion => match contexts.find_active_service() {
                Some((service, context)) => {
                    let context = if contexts.is_collecting_for(service) {
                        contexts.active_collect_context().unwrap_or(context)
                    } else {
                        context
                    };
                    self.resume(request, context)
                }
                None => expired(),
            },

            Intent::ProvideContactDetail => match contexts.active_collect_context() {
                Some(context) => self.resume(request, context),
                None => expired(),
            },

            Intent::Helpline => {
                TurnDecision::Respond(TurnOutcome::informational(self.engine.helpline_reply()))
            }

            Intent::KnowledgeQuery => TurnDecision::AskKnowledge {
                utterance: request.utterance.clone(),
            },

            Intent::Fallback | Intent::Unrecognized(_) => self.recover(request),
        }
    }

    fn recover(&self, request: &TurnRequest) -> TurnDecision {
        FallbackRecovery::new(&self.engine).resolve(request)
    }

    fn resume(&self, request: &TurnRequest, context: &ActiveContext) -> TurnDecision {
        TurnDecision::Respond(self.engine.resume(&request.session, context, &request.utterance))
    }
}

fn expired() -> TurnDecision {
    TurnDecision::Respond(TurnOutcome::session_expired(ExpiryCause::MissingContext))
}
