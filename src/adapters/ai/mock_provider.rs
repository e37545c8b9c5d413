//! Scripted AI provider for tests.
//!
//! Answers are consumed in order; once the script runs out every call gets
//! the fallback answer. A delay can be set to exercise the knowledge timeout.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::ports::{AIError, AIProvider, GeneratedText, PromptRequest};

const MOCK_MODEL: &str = "mock-model";
const FALLBACK_ANSWER: &str = "Mock answer";

/// One scripted outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    Answer(String),
    Fail(MockError),
}

/// Failures the mock can be told to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    NotConfigured,
    RateLimited,
    Blocked(String),
    Unavailable(String),
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::NotConfigured => AIError::NotConfigured,
            MockError::RateLimited => AIError::RateLimited,
            MockError::Blocked(reason) => AIError::Blocked(reason),
            MockError::Unavailable(message) => AIError::unavailable(message),
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<MockResponse>,
    received: Vec<PromptRequest>,
}

/// Clones share the same script, so a test can keep a handle after passing
/// the provider into the responder.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<Script>>,
    delay: Duration,
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, answer: impl Into<String>) -> Self {
        self.script().responses.push_back(MockResponse::Answer(answer.into()));
        self
    }

    pub fn with_error(self, error: MockError) -> Self {
        self.script().responses.push_back(MockResponse::Fail(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.script().received.len()
    }

    /// Requests received so far, oldest first.
    pub fn received(&self) -> Vec<PromptRequest> {
        self.script().received.clone()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn generate(&self, request: PromptRequest) -> Result<GeneratedText, AIError> {
        let next = {
            let mut script = self.script();
            script.received.push(request);
            script.responses.pop_front()
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match next.unwrap_or_else(|| MockResponse::Answer(FALLBACK_ANSWER.to_string())) {
            MockResponse::Answer(text) => Ok(GeneratedText::new(text, MOCK_MODEL)),
            MockResponse::Fail(err) => Err(err.into()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
