//! Integration tests for whole conversations through the webhook.
//!
//! A small platform simulator carries contexts between turns the way the
//! NLU platform does: every turn spends one lifespan, returned contexts
//! replace stored ones, and zero-lifespan contexts are dropped.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;

use lead_qualifier::adapters::ai::MockAIProvider;
use lead_qualifier::adapters::content::InMemoryContentStore;
use lead_qualifier::adapters::delivery::{ChannelLeadDelivery, EmailLeadDelivery, LeadMailerConfig};
use lead_qualifier::adapters::email::RecordingEmailSender;
use lead_qualifier::adapters::http::{webhook_router, WebhookAppState};
use lead_qualifier::adapters::knowledge::{
    ContentFirstResponder, KnowledgePrompt, FOUND_PREFIX, NOT_CONFIGURED_REPLY,
};
use lead_qualifier::application::{HandleTurnHandler, LeadDispatcher};
use lead_qualifier::domain::catalog::{ServiceCatalog, ServiceId};
use lead_qualifier::domain::dialogue::{
    EmailPolicy, FlowEngine, FlowSettings, IntentRouter, EMAIL_PROMPT, INVALID_EMAIL_REPLY,
    NAME_PROMPT, SESSION_EXPIRED_REPLY,
};
use lead_qualifier::domain::lead::Lead;
use lead_qualifier::ports::{AIProvider, LeadDelivery, PageContent};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SESSION: &str = "projects/softcodix/agent/sessions/it-42";

struct Harness {
    app: Router,
    contexts: Vec<Value>,
}

impl Harness {
    fn new(delivery: Arc<dyn LeadDelivery>, ai: Option<MockAIProvider>, policy: EmailPolicy) -> Self {
        let store = InMemoryContentStore::with_pages(vec![PageContent::new(
            "https://softcodix.com/about",
            "Softcodix office hours are 10am to 7pm, Monday to Saturday.",
        )
        .with_title("About")]);
        let catalog = ServiceCatalog::global();
        let knowledge = ContentFirstResponder::new(
            Arc::new(store),
            ai.map(|p| Arc::new(p) as Arc<dyn AIProvider>),
            KnowledgePrompt::from_catalog("Softcodix", "A software house.", catalog),
            Duration::from_secs(1),
        );
        let settings = FlowSettings {
            email_policy: policy,
            ..FlowSettings::default()
        };
        let handler = HandleTurnHandler::new(
            IntentRouter::new(FlowEngine::new(catalog, settings)),
            Arc::new(knowledge),
            LeadDispatcher::new(delivery),
        );
        let app = webhook_router(
            WebhookAppState::new(Arc::new(handler), false),
            "/webhook",
            Duration::from_secs(5),
        );
        Self {
            app,
            contexts: Vec::new(),
        }
    }

    fn with_channel(policy: EmailPolicy) -> (Self, UnboundedReceiver<Lead>) {
        let (delivery, rx) = ChannelLeadDelivery::new();
        (Self::new(Arc::new(delivery), None, policy), rx)
    }

    /// Sends one turn and applies the returned contexts.
    async fn say(&mut self, intent: &str, text: &str) -> Value {
        let body = json!({
            "session": SESSION,
            "queryResult": {
                "queryText": text,
                "intent": { "displayName": intent },
                "parameters": {},
                "outputContexts": self.contexts
            }
        });
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let reply: Value = serde_json::from_slice(&bytes).unwrap();

        self.apply(&reply);
        reply
    }

    fn apply(&mut self, reply: &Value) {
        for context in &mut self.contexts {
            let remaining = context["lifespanCount"].as_u64().unwrap_or(0).saturating_sub(1);
            context["lifespanCount"] = json!(remaining);
        }
        if let Some(outputs) = reply["outputContexts"].as_array() {
            for output in outputs {
                self.contexts.retain(|c| c["name"] != output["name"]);
                self.contexts.push(output.clone());
            }
        }
        self.contexts
            .retain(|c| c["lifespanCount"].as_u64().unwrap_or(0) > 0);
    }

    fn context_names(&self) -> Vec<String> {
        self.contexts
            .iter()
            .filter_map(|c| c["name"].as_str())
            .map(|n| n.rsplit('/').next().unwrap_or(n).to_string())
            .collect()
    }
}

fn text(reply: &Value) -> &str {
    reply["fulfillmentText"].as_str().unwrap_or_default()
}

fn questions(service: ServiceId) -> Vec<&'static str> {
    ServiceCatalog::global().get(service).questions().to_vec()
}

// =============================================================================
// Conversations
// =============================================================================

#[tokio::test]
async fn website_conversation_produces_a_lead() {
    let (mut platform, mut leads) = Harness::with_channel(EmailPolicy::RejectInvalid);
    let script = questions(ServiceId::Website);

    let reply = platform.say("website-inquiry", "I need a website").await;
    assert_eq!(text(&reply), script[0]);
    assert_eq!(platform.context_names(), vec!["website-context"]);

    for (i, _) in script.iter().enumerate().skip(1) {
        let reply = platform.say("answer-question", &format!("answer {}", i)).await;
        assert_eq!(text(&reply), script[i]);
    }

    let reply = platform.say("answer-question", "about two months").await;
    assert_eq!(text(&reply), NAME_PROMPT);
    assert_eq!(platform.context_names(), vec!["collect-details-context"]);

    let reply = platform.say("provide-contact-detail", "Ali Khan").await;
    assert!(text(&reply).contains("Ali Khan"));

    let reply = platform.say("provide-contact-detail", "03001234567").await;
    assert_eq!(text(&reply), EMAIL_PROMPT);

    let reply = platform.say("provide-contact-detail", "ali@example.com").await;
    assert!(text(&reply).starts_with("✅ Thank you, Ali Khan!"));
    assert!(platform.contexts.is_empty());

    let lead = leads.recv().await.unwrap();
    assert_eq!(lead.service, ServiceId::Website);
    assert_eq!(lead.name, "Ali Khan");
    assert_eq!(lead.phone, "03001234567");
    assert_eq!(lead.email, "ali@example.com");
    let recorded: Vec<(String, String)> = lead
        .answers
        .iter()
        .map(|a| (a.question.clone(), a.answer.clone()))
        .collect();
    assert_eq!(recorded.len(), script.len());
    assert_eq!(recorded[0], (script[0].to_string(), "answer 1".to_string()));
    assert_eq!(
        recorded[script.len() - 1],
        (script[script.len() - 1].to_string(), "about two months".to_string())
    );
}

#[tokio::test]
async fn fallback_turns_drive_the_flow_from_context_alone() {
    let (mut platform, mut leads) = Harness::with_channel(EmailPolicy::RejectInvalid);
    let script = questions(ServiceId::Design);

    let reply = platform
        .say("Default Fallback Intent", "can you design a logo for me")
        .await;
    assert_eq!(text(&reply), script[0]);

    for i in 1..=script.len() {
        platform.say("Default Fallback Intent", &format!("design answer {}", i)).await;
    }
    platform.say("Default Fallback Intent", "Sara Ahmed").await;
    platform.say("Default Fallback Intent", "03001234567").await;
    let reply = platform.say("Default Fallback Intent", "sara@example.com").await;

    assert!(text(&reply).contains("Sara Ahmed"));
    let lead = leads.recv().await.unwrap();
    assert_eq!(lead.service, ServiceId::Design);
    assert_eq!(lead.answers.len(), script.len());
}

#[tokio::test]
async fn keyword_for_another_service_is_answer_to_current_question() {
    let (mut platform, _leads) = Harness::with_channel(EmailPolicy::RejectInvalid);
    let script = questions(ServiceId::MobileApp);

    platform.say("mobile-app-inquiry", "I want an app").await;
    let reply = platform
        .say("Default Fallback Intent", "also a website later")
        .await;

    assert_eq!(text(&reply), script[1]);
    assert_eq!(platform.context_names(), vec!["mobile-app-context"]);
}

#[tokio::test]
async fn second_begin_intent_does_not_start_a_parallel_flow() {
    let (mut platform, _leads) = Harness::with_channel(EmailPolicy::RejectInvalid);
    let script = questions(ServiceId::Chatbot);

    platform.say("chatbot-inquiry", "I need a chatbot").await;
    let reply = platform.say("website-inquiry", "for my website").await;

    assert_eq!(text(&reply), script[1]);
    assert_eq!(platform.context_names(), vec!["chatbot-context"]);
}

#[tokio::test]
async fn invalid_contact_details_are_reprompted() {
    let (mut platform, _leads) = Harness::with_channel(EmailPolicy::RejectInvalid);

    platform.say("marketing-inquiry", "marketing please").await;
    for i in 1..=questions(ServiceId::Marketing).len() {
        platform.say("answer-question", &format!("m{}", i)).await;
    }

    let reply = platform.say("provide-contact-detail", "A").await;
    assert!(text(&reply).contains("valid name"));

    platform.say("provide-contact-detail", "Bilal").await;
    let reply = platform.say("provide-contact-detail", "12345").await;
    assert!(text(&reply).to_lowercase().contains("phone"));

    platform.say("provide-contact-detail", "03211234567").await;
    let reply = platform.say("provide-contact-detail", "bilal-at-example").await;
    assert_eq!(text(&reply), INVALID_EMAIL_REPLY);
    assert_eq!(platform.context_names(), vec!["collect-details-context"]);
}

#[tokio::test]
async fn lenient_policy_acknowledges_but_skips_delivery() {
    let (mut platform, mut leads) = Harness::with_channel(EmailPolicy::AcknowledgeAlways);

    platform.say("chatbot-inquiry", "bot").await;
    for i in 1..=questions(ServiceId::Chatbot).len() {
        platform.say("answer-question", &format!("c{}", i)).await;
    }
    platform.say("provide-contact-detail", "Sara").await;
    platform.say("provide-contact-detail", "03001234567").await;
    let reply = platform.say("provide-contact-detail", "not-an-email").await;

    assert!(text(&reply).starts_with("✅ Thank you, Sara!"));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(leads.try_recv().is_err());
}

#[tokio::test]
async fn answer_after_flow_completed_expires_session() {
    let (mut platform, _leads) = Harness::with_channel(EmailPolicy::RejectInvalid);

    let reply = platform.say("answer-question", "hello?").await;

    assert_eq!(text(&reply), SESSION_EXPIRED_REPLY);
    assert!(reply.get("outputContexts").is_none());
}

// =============================================================================
// Knowledge and delivery collaborators
// =============================================================================

#[tokio::test]
async fn knowledge_questions_use_stored_content_then_model() {
    let (delivery, _rx) = ChannelLeadDelivery::new();
    let ai = MockAIProvider::new().with_response("We build apps, websites and chatbots.");
    let mut platform = Harness::new(Arc::new(delivery), Some(ai.clone()), EmailPolicy::RejectInvalid);

    let reply = platform.say("LLMQueryIntent", "office hours").await;
    assert!(text(&reply).starts_with(FOUND_PREFIX));
    assert!(text(&reply).contains("10am to 7pm"));
    assert_eq!(ai.call_count(), 0);

    let reply = platform.say("LLMQueryIntent", "what do you offer?").await;
    assert_eq!(text(&reply), "We build apps, websites and chatbots.");
    assert_eq!(ai.call_count(), 1);
}

#[tokio::test]
async fn knowledge_question_without_model_gets_typed_reply() {
    let (mut platform, _leads) = Harness::with_channel(EmailPolicy::RejectInvalid);

    let reply = platform.say("knowledge-query", "who are your clients?").await;

    assert_eq!(text(&reply), NOT_CONFIGURED_REPLY);
}

#[tokio::test]
async fn unrelated_fallback_goes_to_knowledge() {
    let (delivery, _rx) = ChannelLeadDelivery::new();
    let ai = MockAIProvider::new().with_response("Happy to help!");
    let mut platform = Harness::new(Arc::new(delivery), Some(ai), EmailPolicy::RejectInvalid);

    let reply = platform.say("Default Fallback Intent", "how is the weather").await;

    assert_eq!(text(&reply), "Happy to help!");
    assert!(platform.contexts.is_empty());
}

#[tokio::test]
async fn completed_lead_is_emailed_to_staff_and_prospect() {
    let sender = RecordingEmailSender::new();
    let delivery = EmailLeadDelivery::new(
        Arc::new(sender.clone()),
        LeadMailerConfig {
            staff_address: "sales@softcodix.com".to_string(),
            company_name: "Softcodix".to_string(),
            helpline_number: "02138899998".to_string(),
        },
    );
    let mut platform = Harness::new(Arc::new(delivery), None, EmailPolicy::RejectInvalid);

    platform.say("design-inquiry", "logo").await;
    for i in 1..=questions(ServiceId::Design).len() {
        platform.say("answer-question", &format!("d{}", i)).await;
    }
    platform.say("provide-contact-detail", "Hina").await;
    platform.say("provide-contact-detail", "03331234567").await;
    platform.say("provide-contact-detail", "hina@example.com").await;

    let mut sent = sender.sent();
    for _ in 0..100 {
        if sent.len() >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        sent = sender.sent();
    }

    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "sales@softcodix.com");
    assert!(sent[0].subject.contains("Hina"));
    assert_eq!(sent[1].to, "hina@example.com");
    assert!(sent[1].text.starts_with("Hi Hina,"));
}
