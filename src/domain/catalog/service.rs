//! Service identifiers and their qualification definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The fixed set of service categories a prospect can enquire about.
///
/// The kebab-case wire form (`mobile-app`) is also the stem of the
/// context name handed back to the NLU platform (`mobile-app-context`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceId {
    Website,
    MobileApp,
    Marketing,
    Chatbot,
    Design,
}

impl ServiceId {
    /// All services, in catalog order.
    pub const ALL: [ServiceId; 5] = [
        ServiceId::Website,
        ServiceId::MobileApp,
        ServiceId::Marketing,
        ServiceId::Chatbot,
        ServiceId::Design,
    ];

    /// Wire identifier (`website`, `mobile-app`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::MobileApp => "mobile-app",
            Self::Marketing => "marketing",
            Self::Chatbot => "chatbot",
            Self::Design => "design",
        }
    }

    /// Human label used in replies and notifications.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Website => "Website Development",
            Self::MobileApp => "Mobile App Development",
            Self::Marketing => "Digital Marketing",
            Self::Chatbot => "AI Chatbot",
            Self::Design => "Graphic Design",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ServiceId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ValidationError::invalid_format("service", format!("unknown service '{}'", s)))
    }
}

/// Immutable qualification script for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub id: ServiceId,
    questions: Vec<&'static str>,
    keywords: Vec<&'static str>,
}

impl ServiceDefinition {
    pub(super) fn new(
        id: ServiceId,
        questions: &[&'static str],
        keywords: &[&'static str],
    ) -> Self {
        Self {
            id,
            questions: questions.to_vec(),
            keywords: keywords.to_vec(),
        }
    }

    /// Qualification questions in the order they are asked.
    pub fn questions(&self) -> &[&'static str] {
        &self.questions
    }

    /// Number of qualification questions (`N` in the flow).
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Question at a zero-based position, if any.
    pub fn question(&self, index: usize) -> Option<&'static str> {
        self.questions.get(index).copied()
    }

    /// Lower-case detection keywords.
    pub fn keywords(&self) -> &[&'static str] {
        &self.keywords
    }

    /// True if any keyword occurs in the utterance as a whole word or phrase,
    /// optionally pluralised with `s` or `es`.
    ///
    /// Matching is case-insensitive and ignores punctuation, so "Need two
    /// WEBSITES!" matches `website` while "whatsapp" does not match `app`.
    pub fn matches(&self, utterance: &str) -> bool {
        let haystack = format!(" {} ", normalize(utterance));
        self.keywords
            .iter()
            .any(|keyword| contains_word(&haystack, keyword))
    }
}

/// `haystack` is normalized text padded with a space on both sides.
fn contains_word(haystack: &str, keyword: &str) -> bool {
    let needle = format!(" {}", keyword);
    haystack.match_indices(&needle).any(|(start, _)| {
        let rest = &haystack[start + needle.len()..];
        ["", "s", "es"]
            .iter()
            .any(|suffix| rest.strip_prefix(suffix).is_some_and(|tail| tail.starts_with(' ')))
    })
}

/// Lower-cases and collapses every non-alphanumeric run into a single space.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_id_round_trips_through_str() {
        for id in ServiceId::ALL {
            assert_eq!(id.as_str().parse::<ServiceId>().unwrap(), id);
        }
    }

    #[test]
    fn service_id_parse_is_case_insensitive() {
        assert_eq!("Mobile-App".parse::<ServiceId>().unwrap(), ServiceId::MobileApp);
        assert!("seo".parse::<ServiceId>().is_err());
    }

    #[test]
    fn service_id_serializes_kebab_case() {
        let json = serde_json::to_string(&ServiceId::MobileApp).unwrap();
        assert_eq!(json, "\"mobile-app\"");
    }

    #[test]
    fn matches_whole_words_only() {
        let def = ServiceDefinition::new(ServiceId::MobileApp, &["q"], &["app", "mobile app"]);
        assert!(def.matches("I want an APP for my shop"));
        assert!(def.matches("we need a mobile-app, please"));
        assert!(!def.matches("message me on whatsapp"));
    }

    #[test]
    fn matches_plural_keywords() {
        let def = ServiceDefinition::new(ServiceId::MobileApp, &["q"], &["app", "mobile app"]);
        assert!(def.matches("Mobile apps please"));
        assert!(def.matches("two apps."));
        assert!(!def.matches("an apple a day"));
        assert!(!def.matches("applications"));
    }

    #[test]
    fn matches_es_plural() {
        let def = ServiceDefinition::new(ServiceId::Marketing, &["q"], &["campaign", "business"]);
        assert!(def.matches("our businesses need help"));
        assert!(def.matches("ad campaigns"));
        assert!(!def.matches("businessman"));
    }

    #[test]
    fn question_lookup_is_bounded() {
        let def = ServiceDefinition::new(ServiceId::Design, &["a", "b"], &[]);
        assert_eq!(def.question(1), Some("b"));
        assert_eq!(def.question(2), None);
        assert_eq!(def.question_count(), 2);
    }
}
