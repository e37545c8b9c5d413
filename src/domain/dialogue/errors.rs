//! Error types for the dialogue domain.

use crate::domain::catalog::ServiceId;
use crate::domain::foundation::ValidationError;

/// Failures decoding a caller-supplied context into typed flow state.
///
/// The NLU platform echoes back whatever it was last given, so every one of
/// these means the context was tampered with, truncated or produced by an
/// older revision of the flow.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ContextError {
    #[error("Context '{0}' is not a dialogue context")]
    UnknownContext(String),

    #[error("Missing required parameter: {0}")]
    MissingField(&'static str),

    #[error("Parameter '{field}' has the wrong type: expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Context for {context:?} carries parameters for {declared:?}")]
    ServiceMismatch {
        context: ServiceId,
        declared: ServiceId,
    },

    #[error("Question index {index} exceeds {count} questions")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Parameter '{field}' is populated before step {step}")]
    FieldOutOfOrder {
        field: &'static str,
        step: &'static str,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Flow engine errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FlowError {
    #[error("Invalid stage transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    #[error("Question index {index} exceeds {count} questions")]
    QuestionIndexOutOfRange { index: usize, count: usize },
}
