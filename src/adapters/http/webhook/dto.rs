//! HTTP DTOs for the fulfilment webhook.
//!
//! Field names follow the Dialogflow ES webhook format (camelCase). These
//! types convert to and from the dialogue types at the edge.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{
    ActiveContext, ContextSet, Intent, Parameters, Reply, RichMessage, SessionPath, TurnOutcome,
    TurnRequest,
};
use crate::domain::foundation::ErrorCode;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of a fulfilment call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// Session path, prefix of every context name.
    pub session: String,
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: String,
    #[serde(default)]
    pub intent: Option<IntentDto>,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub output_contexts: Vec<ContextDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDto {
    #[serde(default)]
    pub display_name: String,
}

/// A context as it appears on the wire, in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextDto {
    pub name: String,
    /// Absent means the context is already spent.
    #[serde(default)]
    pub lifespan_count: u32,
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
}

impl From<ContextDto> for ActiveContext {
    fn from(dto: ContextDto) -> Self {
        ActiveContext::new(dto.name, dto.lifespan_count, dto.parameters)
    }
}

impl From<ActiveContext> for ContextDto {
    fn from(context: ActiveContext) -> Self {
        Self {
            name: context.name,
            lifespan_count: context.lifespan_count,
            parameters: context.parameters,
        }
    }
}

impl From<WebhookRequest> for TurnRequest {
    fn from(request: WebhookRequest) -> Self {
        let query = request.query_result;
        let intent = query.intent.map(|i| i.display_name).unwrap_or_default();
        let contexts: ContextSet = query.output_contexts.into_iter().map(ActiveContext::from).collect();

        TurnRequest {
            session: SessionPath::new(request.session),
            utterance: query.query_text,
            intent: Intent::parse(&intent),
            parameters: query.parameters,
            contexts,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body returned to the platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_messages: Vec<FulfillmentMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<ContextDto>,
}

/// One entry of `fulfillmentMessages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FulfillmentMessage {
    Text(TextMessage),
    Payload(RichPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMessage {
    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichPayload {
    pub rich_content: Vec<Vec<RichElement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RichElement {
    Button {
        text: String,
        link: String,
        icon: Icon,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icon {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
}

impl From<TurnOutcome> for WebhookResponse {
    fn from(outcome: TurnOutcome) -> Self {
        let output_contexts = outcome.contexts.into_iter().map(ContextDto::from).collect();
        match outcome.reply {
            Reply::Text(text) => Self {
                fulfillment_text: Some(text),
                fulfillment_messages: Vec::new(),
                output_contexts,
            },
            Reply::Rich(messages) => Self {
                fulfillment_text: None,
                fulfillment_messages: render_messages(messages),
                output_contexts,
            },
        }
    }
}

/// Text messages map one-to-one; consecutive buttons share a payload row.
fn render_messages(messages: Vec<RichMessage>) -> Vec<FulfillmentMessage> {
    let mut rendered = Vec::with_capacity(messages.len());
    for message in messages {
        match message {
            RichMessage::Text(text) => {
                rendered.push(FulfillmentMessage::Text(TextMessage { text }));
            }
            RichMessage::Button {
                text,
                link,
                icon_type,
                icon_color,
            } => {
                let button = RichElement::Button {
                    text,
                    link,
                    icon: Icon {
                        kind: icon_type,
                        color: icon_color,
                    },
                };
                match rendered.last_mut() {
                    Some(FulfillmentMessage::Payload(payload)) => match payload.rich_content.last_mut() {
                        Some(row) => row.push(button),
                        None => payload.rich_content.push(vec![button]),
                    },
                    _ => rendered.push(FulfillmentMessage::Payload(RichPayload {
                        rich_content: vec![vec![button]],
                    })),
                }
            }
        }
    }
    rendered
}

// ════════════════════════════════════════════════════════════════════════════
// Error DTOs
// ════════════════════════════════════════════════════════════════════════════

/// `{"error": {...}}` body for non-200 replies.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::MalformedRequest.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            code: ErrorCode::MethodNotAllowed.to_string(),
            message: "Only POST is supported".to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn into_envelope(self) -> ErrorEnvelope {
        ErrorEnvelope { error: self }
    }
}
