//! Fallback Recovery - working out the turn from contexts alone.
//!
//! Used when the NLU platform could not classify the utterance, and when a
//! begin intent collides with a flow already in progress.

use super::context::ActiveContext;
use super::engine::FlowEngine;
use super::router::{TurnDecision, TurnRequest};

/// Resolves an ambiguous turn, in priority order:
///
/// 1. an active service context (unless its collection already started)
///    takes the utterance as the pending answer;
/// 2. an active collect-details context takes it as the pending field;
/// 3. with no service context active, keyword detection may begin a flow;
/// 4. otherwise the utterance goes to the knowledge responder.
pub struct FallbackRecovery<'a> {
    engine: &'a FlowEngine,
}

impl<'a> FallbackRecovery<'a> {
    pub fn new(engine: &'a FlowEngine) -> Self {
        Self { engine }
    }

    pub fn resolve(&self, request: &TurnRequest) -> TurnDecision {
        let contexts = &request.contexts;

        if let Some((service, context)) = contexts.find_active_service() {
            if !contexts.is_collecting_for(service) {
                return self.resume(request, context);
            }
        }

        if let Some(context) = contexts.active_collect_context() {
            return self.resume(request, context);
        }

        if !contexts.has_any_active_service() {
            if let Some(service) = self.engine.catalog().detect(&request.utterance) {
                return TurnDecision::Respond(self.engine.begin(&request.session, service, contexts));
            }
        }

        TurnDecision::AskKnowledge {
            utterance: request.utterance.clone(),
        }
    }

    fn resume(&self, request: &TurnRequest, context: &ActiveContext) -> TurnDecision {
        TurnDecision::Respond(self.engine.resume(&request.session, context, &request.utterance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ServiceCatalog, ServiceId};
    use crate::domain::dialogue::{
        ContextSet, FlowSettings, FlowStage, Intent, Parameters, Reply, SessionPath, TurnOutcome,
    };
    use serde_json::json;

    const SESSION: &str = "projects/softcodix/agent/sessions/fb-7";

    fn engine() -> FlowEngine {
        FlowEngine::new(ServiceCatalog::global(), FlowSettings::default())
    }

    fn ctx(short: &str, lifespan: u32, params: serde_json::Value) -> ActiveContext {
        ActiveContext::new(
            format!("{}/contexts/{}", SESSION, short),
            lifespan,
            params.as_object().cloned().unwrap_or_default(),
        )
    }

    fn fallback(utterance: &str, contexts: Vec<ActiveContext>) -> TurnRequest {
        TurnRequest {
            session: SessionPath::new(SESSION),
            utterance: utterance.to_string(),
            intent: Intent::Fallback,
            parameters: Parameters::new(),
            contexts: ContextSet::new(contexts),
        }
    }

    fn respond(decision: TurnDecision) -> TurnOutcome {
        match decision {
            TurnDecision::Respond(outcome) => outcome,
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    #[test]
    fn keyword_begins_a_flow_when_nothing_is_active() {
        let engine = engine();
        let outcome = respond(FallbackRecovery::new(&engine).resolve(&fallback("I want a logo", vec![])));
        let design = ServiceCatalog::global().get(ServiceId::Design);
        assert_eq!(outcome.reply, Reply::text(design.questions()[0]));
        assert_eq!(outcome.contexts[0].short_name(), "design-context");
    }

    #[test]
    fn expired_service_context_does_not_block_detection() {
        let engine = engine();
        let stale = ctx("mobile-app-context", 0, json!({ "question_index": 3 }));
        let outcome = respond(
            FallbackRecovery::new(&engine).resolve(&fallback("need seo for my shop", vec![stale])),
        );
        assert_eq!(outcome.contexts[0].short_name(), "marketing-context");
        assert_eq!(outcome.stage, FlowStage::AskingQuestions);
    }

    #[test]
    fn collect_context_takes_the_pending_field() {
        let engine = engine();
        let collect = ctx(
            "collect-details-context",
            6,
            json!({ "service": "chatbot", "step": "phone", "name": "Ali" }),
        );
        let outcome = respond(
            FallbackRecovery::new(&engine).resolve(&fallback("0300 1234567", vec![collect])),
        );
        assert_eq!(outcome.stage, FlowStage::CollectingEmail);
    }

    #[test]
    fn unmatched_utterance_goes_to_knowledge() {
        let engine = engine();
        let decision = FallbackRecovery::new(&engine).resolve(&fallback("where is your office", vec![]));
        assert_eq!(
            decision,
            TurnDecision::AskKnowledge {
                utterance: "where is your office".to_string()
            }
        );
    }
}
