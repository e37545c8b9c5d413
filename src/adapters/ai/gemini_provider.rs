//! Gemini Provider - answers knowledge questions through `generateContent`.
//!
//! The instructions travel as `systemInstruction`; the visitor's utterance
//! is the single user turn.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash-lite")
//!     .with_timeout(Duration::from_secs(4));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{AIError, AIProvider, GeneratedText, PromptRequest};

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Transport timeout; the responder applies its own tighter bound.
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash-lite".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(4),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(request: &PromptRequest) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: request.instructions.clone(),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: request.question.clone(),
                }],
            }],
            generation_config: request.max_output_tokens.map(|max| GenerationConfig {
                max_output_tokens: max,
            }),
        }
    }

    async fn send_request(&self, request: &PromptRequest) -> Result<Response, AIError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&Self::to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    }
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn check_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::RateLimited,
            500..=599 => AIError::unavailable(format!("{}: {}", status, body)),
            _ => AIError::network(format!("unexpected status {}: {}", status, body)),
        })
    }

    fn parse_body(&self, body: GeminiResponse) -> Result<GeneratedText, AIError> {
        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AIError::Blocked(reason));
        }

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("no candidates in response"))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        let text = text.trim();

        let finish = candidate.finish_reason.as_deref().unwrap_or("STOP");
        if text.is_empty() {
            return Err(match finish {
                "SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST" => AIError::Blocked(finish.to_string()),
                _ => AIError::parse("candidate has no text"),
            });
        }

        Ok(GeneratedText {
            text: text.to_string(),
            model: body.model_version.unwrap_or_else(|| self.config.model.clone()),
            tokens_used: body.usage_metadata.map(|u| u.total_token_count).unwrap_or(0),
            truncated: finish == "MAX_TOKENS",
        })
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn generate(&self, request: PromptRequest) -> Result<GeneratedText, AIError> {
        let response = self.send_request(&request).await?;
        let response = Self::check_status(response).await?;
        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(e.to_string()))?;
        self.parse_body(body)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Gemini API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PromptTrace;
    use serde_json::json;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new("test-key")).unwrap()
    }

    fn parse(value: serde_json::Value) -> Result<GeneratedText, AIError> {
        provider().parse_body(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn config_builder_overrides_defaults() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-2.0-flash")
            .with_base_url("https://custom.api.com/v1")
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn generate_url_includes_model() {
        let provider =
            GeminiProvider::new(GeminiConfig::new("k").with_base_url("https://x.test/v1beta/"))
                .unwrap();
        assert_eq!(
            provider.generate_url(),
            "https://x.test/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
    }

    #[test]
    fn request_puts_instructions_in_system_instruction() {
        let request = PromptRequest::new("Be brief", "Hi", PromptTrace::default()).with_max_output_tokens(200);

        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], json!("Be brief"));
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], json!("user"));
        assert_eq!(body["contents"][0]["parts"][0]["text"], json!("Hi"));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], json!(200));
    }

    #[test]
    fn request_without_limit_omits_generation_config() {
        let request = PromptRequest::new("Be brief", "Hi", PromptTrace::default());
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn joins_parts_and_reads_usage() {
        let answer = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": " We build " }, { "text": "apps. " }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 3, "totalTokenCount": 15 },
            "modelVersion": "gemini-2.5-flash-lite-001"
        }))
        .unwrap();

        assert_eq!(answer.text, "We build apps.");
        assert_eq!(answer.tokens_used, 15);
        assert_eq!(answer.model, "gemini-2.5-flash-lite-001");
        assert!(!answer.truncated);
    }

    #[test]
    fn max_tokens_marks_answer_truncated() {
        let answer = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "We build" }] }, "finishReason": "MAX_TOKENS" }]
        }))
        .unwrap();

        assert!(answer.truncated);
        assert_eq!(answer.model, "gemini-2.5-flash-lite");
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let err = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } })).unwrap_err();
        assert!(matches!(err, AIError::Blocked(reason) if reason == "SAFETY"));
    }

    #[test]
    fn empty_safety_candidate_is_blocked() {
        let err = parse(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).unwrap_err();
        assert!(matches!(err, AIError::Blocked(_)));
    }

    #[test]
    fn empty_candidates_is_parse_error() {
        let err = parse(json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }
}
