//! Flow Engine - question sequencing and contact collection.
//!
//! Every transition takes the state decoded from the caller's context plus
//! the user's utterance, and returns the reply together with the contexts
//! for the next turn. Nothing is kept between calls.

use super::context::{ActiveContext, ContextName, ContextSet, SessionPath};
use super::errors::FlowError;
use super::outcome::{ExpiryCause, TurnOutcome};
use super::reply::{HelplineCard, Reply};
use super::stage::FlowStage;
use super::state::{ContactCollectionState, ContactStep, FlowContext, QuestionFlowState};
use crate::domain::catalog::{ServiceCatalog, ServiceId};
use crate::domain::foundation::StateMachine;
use crate::domain::lead::{self, Lead};

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_CHARS: usize = 10;

pub const NAME_PROMPT: &str = "Great, thanks for sharing those details! 🙌 May I have your full name?";
pub const NAME_TOO_SHORT_REPLY: &str = "Please enter a valid name (at least 2 characters).";
pub const PHONE_TOO_SHORT_REPLY: &str =
    "Please enter a valid phone number (at least 10 digits) so our team can reach you.";
pub const EMAIL_PROMPT: &str = "Perfect! Lastly, what's your email address?";
pub const INVALID_EMAIL_REPLY: &str =
    "That doesn't look like a valid email address. Please enter one like name@example.com.";

/// What to do when the final email answer fails the plausibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailPolicy {
    /// Re-prompt for the email; no acknowledgment and no lead.
    #[default]
    RejectInvalid,
    /// Acknowledge anyway and let the dispatcher drop the lead.
    AcknowledgeAlways,
}

/// Tunables for the flow.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Turns a question-flow context stays alive.
    pub question_lifespan: u32,
    /// Turns a collect-details context stays alive.
    pub contact_lifespan: u32,
    pub email_policy: EmailPolicy,
    pub helpline: HelplineCard,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            question_lifespan: 20,
            contact_lifespan: 10,
            email_policy: EmailPolicy::default(),
            helpline: HelplineCard::default(),
        }
    }
}

/// The qualification state machine.
#[derive(Debug, Clone)]
pub struct FlowEngine {
    catalog: &'static ServiceCatalog,
    settings: FlowSettings,
}

impl FlowEngine {
    pub fn new(catalog: &'static ServiceCatalog, settings: FlowSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &'static ServiceCatalog {
        self.catalog
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    pub fn helpline_reply(&self) -> Reply {
        self.settings.helpline.reply()
    }

    /// Starts a fresh question flow and asks the first question.
    ///
    /// Any active collect-details context is expired so an abandoned
    /// contact collection cannot resurface.
    pub fn begin(&self, session: &SessionPath, service: ServiceId, contexts: &ContextSet) -> TurnOutcome {
        let mut outcome = self
            .advance(session, QuestionFlowState::start(service), "")
            .unwrap_or_else(|err| TurnOutcome::session_expired(ExpiryCause::Corrupt(err)));
        if contexts.active_collect_context().is_some() {
            outcome
                .contexts
                .push(ActiveContext::expired(session, ContextName::CollectDetails));
        }
        outcome
    }

    /// Decodes a caller context and applies the transition for its kind.
    ///
    /// Undecodable or corrupt contexts dead-end with the session-expired reply
    /// and are expired, so the next begin intent starts cleanly.
    pub fn resume(&self, session: &SessionPath, context: &ActiveContext, utterance: &str) -> TurnOutcome {
        let result = match FlowContext::decode(context, self.catalog) {
            Ok(FlowContext::Questions(state)) => {
                self.advance(session, state, utterance).map_err(ExpiryCause::Corrupt)
            }
            Ok(FlowContext::Contact(state)) => {
                self.collect(session, state, utterance).map_err(ExpiryCause::Corrupt)
            }
            Err(err) => Err(ExpiryCause::Undecodable(err)),
        };
        result.unwrap_or_else(|cause| TurnOutcome {
            contexts: vec![context.to_expired()],
            ..TurnOutcome::session_expired(cause)
        })
    }

    /// Question-advance transition.
    ///
    /// Attributes the utterance to the question asked last turn, then either
    /// asks the next question or hands over to contact collection.
    pub fn advance(
        &self,
        session: &SessionPath,
        state: QuestionFlowState,
        utterance: &str,
    ) -> Result<TurnOutcome, FlowError> {
        let QuestionFlowState {
            service,
            question_index,
            mut answers,
        } = state;
        let definition = self.catalog.get(service);
        let count = definition.question_count();
        if question_index > count {
            return Err(FlowError::QuestionIndexOutOfRange {
                index: question_index,
                count,
            });
        }

        let from = if question_index == 0 {
            FlowStage::Idle
        } else {
            FlowStage::AskingQuestions
        };
        if let Some(asked) = question_index.checked_sub(1).and_then(|i| definition.question(i)) {
            answers.record(asked, utterance.trim());
        }

        match definition.question(question_index) {
            Some(next) => {
                let stage = from.transition_to(FlowStage::AskingQuestions)?;
                let state = QuestionFlowState {
                    service,
                    question_index: question_index + 1,
                    answers,
                };
                Ok(TurnOutcome {
                    reply: Reply::text(next),
                    contexts: vec![FlowContext::Questions(state)
                        .into_context(session, self.settings.question_lifespan)],
                    stage,
                    lead: None,
                    expired: None,
                })
            }
            None => {
                let stage = from.transition_to(FlowStage::CollectingName)?;
                let state = ContactCollectionState::begin(service, answers);
                Ok(TurnOutcome {
                    reply: Reply::text(NAME_PROMPT),
                    contexts: vec![
                        FlowContext::Contact(state).into_context(session, self.settings.contact_lifespan),
                        ActiveContext::expired(session, ContextName::Service(service)),
                    ],
                    stage,
                    lead: None,
                    expired: None,
                })
            }
        }
    }

    /// Contact-collection transition for the step recorded in the context.
    pub fn collect(
        &self,
        session: &SessionPath,
        state: ContactCollectionState,
        utterance: &str,
    ) -> Result<TurnOutcome, FlowError> {
        let stage = FlowStage::collecting(state.step);
        let value = utterance.trim();

        match state.step {
            ContactStep::Name => {
                if value.chars().count() < MIN_NAME_CHARS {
                    return self.contact_turn(session, stage, state, NAME_TOO_SHORT_REPLY);
                }
                let reply = format!(
                    "Thanks, {}! 😊 What's the best phone number to reach you?",
                    value
                );
                let next = ContactCollectionState {
                    step: ContactStep::Phone,
                    name: Some(value.to_string()),
                    ..state
                };
                self.contact_turn(session, stage, next, reply)
            }
            ContactStep::Phone => {
                if value.chars().count() < MIN_PHONE_CHARS {
                    return self.contact_turn(session, stage, state, PHONE_TOO_SHORT_REPLY);
                }
                let next = ContactCollectionState {
                    step: ContactStep::Email,
                    phone: Some(value.to_string()),
                    ..state
                };
                self.contact_turn(session, stage, next, EMAIL_PROMPT)
            }
            ContactStep::Email => {
                if self.settings.email_policy == EmailPolicy::RejectInvalid
                    && !lead::is_plausible_email(value)
                {
                    return self.contact_turn(session, stage, state, INVALID_EMAIL_REPLY);
                }
                let stage = stage.transition_to(FlowStage::Completed)?;
                let lead = Lead::new(
                    state.service,
                    state.name.unwrap_or_else(|| lead::UNKNOWN_NAME.to_string()),
                    state.phone.unwrap_or_else(|| lead::UNKNOWN_PHONE.to_string()),
                    value,
                    state.answers,
                );
                Ok(TurnOutcome {
                    reply: Reply::text(closing_reply(&lead)),
                    contexts: vec![ActiveContext::expired(session, ContextName::CollectDetails)],
                    stage,
                    lead: Some(lead),
                    expired: None,
                })
            }
        }
    }

    /// Emits the collect-details context for `next.step`. Passing the
    /// unchanged state repeats the current prompt.
    fn contact_turn(
        &self,
        session: &SessionPath,
        from: FlowStage,
        next: ContactCollectionState,
        reply: impl Into<String>,
    ) -> Result<TurnOutcome, FlowError> {
        let stage = from.transition_to(FlowStage::collecting(next.step))?;
        Ok(TurnOutcome {
            reply: Reply::text(reply),
            contexts: vec![FlowContext::Contact(next).into_context(session, self.settings.contact_lifespan)],
            stage,
            lead: None,
            expired: None,
        })
    }
}

fn closing_reply(lead: &Lead) -> String {
    format!(
        "✅ Thank you, {}! We've received your {} request. Our team will contact you shortly.",
        lead.name,
        lead.service.display_name()
    )
}
