//! Knowledge Responder Port - answers free-text questions.
//!
//! Implementations never fail: collaborator errors and timeouts degrade to a
//! fixed reply so the webhook can always answer.

use async_trait::async_trait;

use crate::domain::dialogue::SessionPath;

/// Port for answering questions outside the qualification flow
#[async_trait]
pub trait KnowledgeResponder: Send + Sync {
    /// Reply text for `utterance`.
    async fn answer(&self, session: &SessionPath, utterance: &str) -> String;
}
