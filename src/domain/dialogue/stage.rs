//! Stages of a qualification flow.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::ContactStep;
use crate::domain::foundation::StateMachine;

/// Where a conversation stands after a turn.
///
/// Flow: `Idle` → `AskingQuestions` → `CollectingName` → `CollectingPhone`
/// → `CollectingEmail` → `Completed`. Every collecting stage may loop on
/// itself when the reply is rejected and the prompt repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    #[default]
    Idle,
    AskingQuestions,
    CollectingName,
    CollectingPhone,
    CollectingEmail,
    Completed,
}

impl FlowStage {
    /// Stage that collects the given contact field.
    pub fn collecting(step: ContactStep) -> Self {
        match step {
            ContactStep::Name => Self::CollectingName,
            ContactStep::Phone => Self::CollectingPhone,
            ContactStep::Email => Self::CollectingEmail,
        }
    }

    /// Returns true while a flow context should be handed back to the caller.
    pub fn is_in_flow(&self) -> bool {
        !matches!(self, Self::Idle | Self::Completed)
    }
}

impl StateMachine for FlowStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FlowStage::*;
        matches!(
            (self, target),
            (Idle, AskingQuestions)
                | (AskingQuestions, AskingQuestions)
                | (AskingQuestions, CollectingName)
                | (CollectingName, CollectingName)
                | (CollectingName, CollectingPhone)
                | (CollectingPhone, CollectingPhone)
                | (CollectingPhone, CollectingEmail)
                | (CollectingEmail, CollectingEmail)
                | (CollectingEmail, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FlowStage::*;
        match self {
            Idle => vec![AskingQuestions],
            AskingQuestions => vec![AskingQuestions, CollectingName],
            CollectingName => vec![CollectingName, CollectingPhone],
            CollectingPhone => vec![CollectingPhone, CollectingEmail],
            CollectingEmail => vec![CollectingEmail, Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowStage::Idle => "Idle",
            FlowStage::AskingQuestions => "AskingQuestions",
            FlowStage::CollectingName => "CollectingName",
            FlowStage::CollectingPhone => "CollectingPhone",
            FlowStage::CollectingEmail => "CollectingEmail",
            FlowStage::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}
