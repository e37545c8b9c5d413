//! AI Provider Port - generative text for free-text questions.
//!
//! The knowledge responder asks one question at a time: a fixed set of
//! instructions plus the visitor's utterance. There is no chat history
//! because the webhook keeps none.

use async_trait::async_trait;

/// Port for generative text providers.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Answer a single question under the given instructions.
    async fn generate(&self, request: PromptRequest) -> Result<GeneratedText, AIError>;

    /// Short provider name for logs (e.g. "gemini").
    fn name(&self) -> &str;
}

/// One question for the model.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    /// Persona, rules and company facts.
    pub instructions: String,
    /// The visitor's utterance, verbatim.
    pub question: String,
    pub max_output_tokens: Option<u32>,
    pub trace: PromptTrace,
}

impl PromptRequest {
    pub fn new(instructions: impl Into<String>, question: impl Into<String>, trace: PromptTrace) -> Self {
        Self {
            instructions: instructions.into(),
            question: question.into(),
            max_output_tokens: None,
            trace,
        }
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// Correlates a model call with the webhook turn that caused it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptTrace {
    pub session: String,
    pub trace_id: String,
}

impl PromptTrace {
    pub fn new(session: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            trace_id: trace_id.into(),
        }
    }
}

/// Text produced by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub text: String,
    /// Model version that answered.
    pub model: String,
    pub tokens_used: u32,
    /// The output limit cut the answer short.
    pub truncated: bool,
}

impl GeneratedText {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            tokens_used: 0,
            truncated: false,
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// No API key configured.
    #[error("provider not configured")]
    NotConfigured,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited by provider")]
    RateLimited,

    /// Prompt or answer blocked by the provider's safety filters.
    #[error("blocked: {0}")]
    Blocked(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),

    /// Response did not contain usable text.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl AIError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_request_carries_trace_and_limit() {
        let request = PromptRequest::new("Be brief", "prices?", PromptTrace::new("sessions/1", "t-1"))
            .with_max_output_tokens(256);

        assert_eq!(request.question, "prices?");
        assert_eq!(request.max_output_tokens, Some(256));
        assert_eq!(request.trace.trace_id, "t-1");
    }

    #[test]
    fn generated_text_starts_untruncated() {
        let text = GeneratedText::new("We build apps.", "gemini");
        assert!(!text.truncated);
        assert_eq!(text.tokens_used, 0);
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(AIError::Timeout { timeout_ms: 4000 }.to_string(), "request timed out after 4000ms");
        assert_eq!(AIError::Blocked("SAFETY".into()).to_string(), "blocked: SAFETY");
    }
}
