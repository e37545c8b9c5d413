//! HandleTurnHandler - one webhook turn, end to end.
//!
//! Routes the turn, answers knowledge questions, and dispatches any
//! completed lead before the reply goes back to the caller.

use std::sync::Arc;

use crate::application::LeadDispatcher;
use crate::domain::dialogue::{
    ExpiryCause, IntentRouter, Reply, TurnDecision, TurnOutcome, TurnRequest,
};
use crate::ports::KnowledgeResponder;

/// Handler for a single conversational turn.
pub struct HandleTurnHandler {
    router: IntentRouter,
    knowledge: Arc<dyn KnowledgeResponder>,
    dispatcher: LeadDispatcher,
}

impl HandleTurnHandler {
    pub fn new(
        router: IntentRouter,
        knowledge: Arc<dyn KnowledgeResponder>,
        dispatcher: LeadDispatcher,
    ) -> Self {
        Self {
            router,
            knowledge,
            dispatcher,
        }
    }

    pub async fn handle(&self, request: TurnRequest) -> TurnOutcome {
        tracing::info!(
            session = %request.session,
            intent = %request.intent,
            contexts = request.contexts.iter().count(),
            "Handling turn"
        );
        if !request.parameters.is_empty() {
            tracing::debug!(
                session = %request.session,
                parameters = ?request.parameters,
                "Platform slot parameters"
            );
        }

        let outcome = match self.router.route(&request) {
            TurnDecision::Respond(outcome) => outcome,
            TurnDecision::AskKnowledge { utterance } => {
                tracing::debug!(session = %request.session, "Routing to knowledge responder");
                let answer = self.knowledge.answer(&request.session, &utterance).await;
                TurnOutcome::informational(Reply::text(answer))
            }
        };

        match &outcome.expired {
            Some(ExpiryCause::MissingContext) => {
                tracing::info!(session = %request.session, "No active flow context, session expired")
            }
            Some(cause @ (ExpiryCause::Undecodable(_) | ExpiryCause::Corrupt(_))) => {
                tracing::warn!(session = %request.session, cause = ?cause, "Discarding unusable flow context")
            }
            None => {}
        }

        if let Some(lead) = &outcome.lead {
            match self.dispatcher.dispatch(lead.clone()) {
                Ok(_detached) => {}
                Err(e) => tracing::warn!(
                    session = %request.session,
                    lead_id = %lead.id,
                    error = %e,
                    "Lead not delivered"
                ),
            }
        }

        tracing::debug!(session = %request.session, stage = %outcome.stage, "Turn handled");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::delivery::ChannelLeadDelivery;
    use crate::domain::catalog::ServiceCatalog;
    use crate::domain::dialogue::{
        ActiveContext, ContextSet, EmailPolicy, FlowEngine, FlowSettings, FlowStage, Intent,
        Parameters, SessionPath, SESSION_EXPIRED_REPLY,
    };
    use crate::domain::lead::Lead;
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::mpsc::UnboundedReceiver;

    const SESSION: &str = "projects/softcodix/agent/sessions/turn-1";

    struct CannedResponder;

    #[async_trait]
    impl KnowledgeResponder for CannedResponder {
        async fn answer(&self, _session: &SessionPath, utterance: &str) -> String {
            format!("answer to {}", utterance)
        }
    }

    fn handler(policy: EmailPolicy) -> (HandleTurnHandler, UnboundedReceiver<Lead>) {
        let (delivery, rx) = ChannelLeadDelivery::new();
        let settings = FlowSettings {
            email_policy: policy,
            ..FlowSettings::default()
        };
        let handler = HandleTurnHandler::new(
            IntentRouter::new(FlowEngine::new(ServiceCatalog::global(), settings)),
            Arc::new(CannedResponder),
            LeadDispatcher::new(Arc::new(delivery)),
        );
        (handler, rx)
    }

    fn request(intent: &str, utterance: &str, contexts: Vec<ActiveContext>) -> TurnRequest {
        TurnRequest {
            session: SessionPath::new(SESSION),
            utterance: utterance.to_string(),
            intent: Intent::parse(intent),
            parameters: Parameters::new(),
            contexts: ContextSet::new(contexts),
        }
    }

    fn collect_context(email_step_params: serde_json::Value) -> ActiveContext {
        ActiveContext::new(
            format!("{}/contexts/collect-details-context", SESSION),
            10,
            email_step_params.as_object().cloned().unwrap_or_default(),
        )
    }

    #[tokio::test]
    async fn knowledge_query_is_answered_by_responder() {
        let (handler, _rx) = handler(EmailPolicy::RejectInvalid);

        let outcome = handler
            .handle(request("LLMQueryIntent", "do you build apps?", vec![]))
            .await;

        assert_eq!(outcome.reply, Reply::text("answer to do you build apps?"));
        assert!(outcome.contexts.is_empty());
    }

    #[tokio::test]
    async fn completed_flow_dispatches_lead() {
        let (handler, mut rx) = handler(EmailPolicy::RejectInvalid);
        let context = collect_context(json!({
            "service": "chatbot",
            "answers": {},
            "step": "email",
            "name": "Ali",
            "phone": "03001234567"
        }));

        let outcome = handler
            .handle(request("provide-contact-detail", "ali@example.com", vec![context]))
            .await;

        assert_eq!(outcome.stage, FlowStage::Completed);
        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.name, "Ali");
        assert_eq!(delivered.email, "ali@example.com");
    }

    #[tokio::test]
    async fn invalid_email_under_lenient_policy_acknowledges_without_delivery() {
        let (handler, mut rx) = handler(EmailPolicy::AcknowledgeAlways);
        let context = collect_context(json!({
            "service": "design",
            "answers": {},
            "step": "email",
            "name": "Sara",
            "phone": "03001234567"
        }));

        let outcome = handler
            .handle(request("provide-contact-detail", "not-an-email", vec![context]))
            .await;

        assert_eq!(outcome.stage, FlowStage::Completed);
        assert!(outcome.reply.plain_text().contains("Sara"));
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn missing_context_yields_session_expired() {
        let (handler, _rx) = handler(EmailPolicy::RejectInvalid);

        let outcome = handler.handle(request("answer-question", "yes", vec![])).await;

        assert_eq!(outcome.reply, Reply::text(SESSION_EXPIRED_REPLY));
        assert!(outcome.is_session_expired());
    }
}
