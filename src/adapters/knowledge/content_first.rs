//! Content-first knowledge responder.
//!
//! 1. Stored site text containing the utterance wins; the reply is its
//!    opening excerpt.
//! 2. Otherwise the model answers, bounded by a wall-clock timeout. When the
//!    bound elapses the call is dropped and a fixed busy reply is used.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::KnowledgePrompt;
use crate::domain::dialogue::SessionPath;
use crate::ports::{AIError, AIProvider, ContentStore, KnowledgeResponder, PromptRequest, PromptTrace};

pub const FOUND_PREFIX: &str = "🔍 I found this info:\n";
pub const MAX_EXCERPT_CHARS: usize = 400;
pub const BUSY_REPLY: &str = "⏳ Server busy, please try again shortly.";
pub const NOT_CONFIGURED_REPLY: &str = "⚠️ Knowledge assistant is not configured.";
/// Enough for the 3-5 line answers the prompt asks for.
const MAX_OUTPUT_TOKENS: u32 = 512;

/// Answers from stored site content, falling back to the model.
pub struct ContentFirstResponder {
    content: Arc<dyn ContentStore>,
    /// `None` when no API key is configured.
    ai: Option<Arc<dyn AIProvider>>,
    prompt: KnowledgePrompt,
    timeout: Duration,
}

impl ContentFirstResponder {
    pub fn new(
        content: Arc<dyn ContentStore>,
        ai: Option<Arc<dyn AIProvider>>,
        prompt: KnowledgePrompt,
        timeout: Duration,
    ) -> Self {
        Self {
            content,
            ai,
            prompt,
            timeout,
        }
    }

    async fn lookup(&self, utterance: &str) -> Option<String> {
        if utterance.is_empty() {
            return None;
        }
        match self.content.find_matching(utterance).await {
            Ok(Some(page)) => {
                tracing::debug!(url = %page.url, "Knowledge answered from stored content");
                Some(format!("{}{}", FOUND_PREFIX, page.excerpt(MAX_EXCERPT_CHARS)))
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Content lookup failed, falling back to model");
                None
            }
        }
    }

    async fn generate(&self, ai: &dyn AIProvider, session: &SessionPath, utterance: &str) -> String {
        let trace = PromptTrace::new(session.as_str(), Uuid::new_v4().to_string());
        let request = PromptRequest::new(self.prompt.system_prompt(), utterance, trace)
            .with_max_output_tokens(MAX_OUTPUT_TOKENS);

        match tokio::time::timeout(self.timeout, ai.generate(request)).await {
            Ok(Ok(answer)) => {
                tracing::debug!(
                    model = %answer.model,
                    tokens = answer.tokens_used,
                    truncated = answer.truncated,
                    "Knowledge answered by model"
                );
                answer.text
            }
            Ok(Err(AIError::NotConfigured)) => NOT_CONFIGURED_REPLY.to_string(),
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = %ai.name(),
                    error = %e,
                    "Knowledge model call failed"
                );
                BUSY_REPLY.to_string()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Knowledge model call timed out"
                );
                BUSY_REPLY.to_string()
            }
        }
    }
}

#[async_trait]
impl KnowledgeResponder for ContentFirstResponder {
    async fn answer(&self, session: &SessionPath, utterance: &str) -> String {
        let utterance = utterance.trim();
        if let Some(found) = self.lookup(utterance).await {
            return found;
        }
        match &self.ai {
            Some(ai) => self.generate(ai.as_ref(), session, utterance).await,
            None => NOT_CONFIGURED_REPLY.to_string(),
        }
    }
}
