//! Intent names recognised by the webhook.

use std::fmt;

use crate::domain::catalog::ServiceId;

const BEGIN_SUFFIX: &str = "-inquiry";

/// Classification label attached to an utterance by the NLU platform.
///
/// Names are matched trimmed and case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `<service>-inquiry`: start qualifying for a service.
    Begin(ServiceId),
    /// `answer-question`
    AnswerQuestion,
    /// `provide-contact-detail`
    ProvideContactDetail,
    /// `helpline`
    Helpline,
    /// `LLMQueryIntent` (alias `knowledge-query`)
    KnowledgeQuery,
    /// `Default Fallback Intent`
    Fallback,
    /// Anything else, kept verbatim for logging.
    Unrecognized(String),
}

impl Intent {
    pub fn parse(display_name: &str) -> Self {
        let name = display_name.trim().to_ascii_lowercase();
        match name.as_str() {
            "answer-question" => return Self::AnswerQuestion,
            "provide-contact-detail" => return Self::ProvideContactDetail,
            "helpline" => return Self::Helpline,
            "llmqueryintent" | "knowledge-query" => return Self::KnowledgeQuery,
            "default fallback intent" => return Self::Fallback,
            _ => {}
        }

        name.strip_suffix(BEGIN_SUFFIX)
            .and_then(|stem| stem.parse::<ServiceId>().ok())
            .map(Self::Begin)
            .unwrap_or_else(|| Self::Unrecognized(display_name.trim().to_string()))
    }

    /// True for intents the router resolves through fallback recovery.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Fallback | Self::Unrecognized(_))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin(service) => write!(f, "{}{}", service, BEGIN_SUFFIX),
            Self::AnswerQuestion => f.write_str("answer-question"),
            Self::ProvideContactDetail => f.write_str("provide-contact-detail"),
            Self::Helpline => f.write_str("helpline"),
            Self::KnowledgeQuery => f.write_str("LLMQueryIntent"),
            Self::Fallback => f.write_str("Default Fallback Intent"),
            Self::Unrecognized(name) => f.write_str(name),
        }
    }
}
