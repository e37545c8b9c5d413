//! Ordered question → answer record.

use serde_json::{json, Value};

use super::errors::ContextError;
use crate::domain::catalog::ServiceDefinition;

/// A single answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question: String,
    pub answer: String,
}

/// Answers in the order their questions were asked.
///
/// Encoded on the wire as an array of `{"question", "answer"}` objects so the
/// order survives platforms that re-sort JSON object keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(Vec<Answer>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any earlier answer to the same question.
    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        let question = question.into();
        let answer = answer.into();
        match self.0.iter_mut().find(|a| a.question == question) {
            Some(existing) => existing.answer = answer,
            None => self.0.push(Answer { question, answer }),
        }
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.question == question)
            .map(|a| a.answer.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|a| json!({ "question": a.question, "answer": a.answer }))
                .collect(),
        )
    }

    /// Decodes answers from the wire.
    ///
    /// Accepts the array form written by [`Answers::to_value`] and, for
    /// contexts written as a plain `{question: answer}` object, restores
    /// catalog question order (unknown questions keep their relative order
    /// at the end).
    pub fn from_value(value: &Value, definition: &ServiceDefinition) -> Result<Self, ContextError> {
        const WRONG: ContextError = ContextError::WrongType {
            field: "answers",
            expected: "array of {question, answer} or object",
        };

        match value {
            Value::Null => Ok(Self::new()),
            Value::Array(items) => {
                let mut answers = Self::new();
                for item in items {
                    let question = item.get("question").and_then(Value::as_str).ok_or(WRONG)?;
                    let answer = item.get("answer").and_then(Value::as_str).ok_or(WRONG)?;
                    answers.record(question, answer);
                }
                Ok(answers)
            }
            Value::Object(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (question, answer) in map {
                    let answer = answer.as_str().ok_or(WRONG)?;
                    let rank = definition
                        .questions()
                        .iter()
                        .position(|q| q == question)
                        .unwrap_or(usize::MAX);
                    pairs.push((rank, question.as_str(), answer));
                }
                pairs.sort_by_key(|(rank, _, _)| *rank);

                let mut answers = Self::new();
                for (_, question, answer) in pairs {
                    answers.record(question, answer);
                }
                Ok(answers)
            }
            _ => Err(WRONG),
        }
    }
}
