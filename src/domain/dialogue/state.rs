//! Typed flow state carried inside contexts.
//!
//! Each context kind has its own parameter layout. [`FlowContext`] is the
//! tagged union of the two, with explicit encoding to and decoding from the
//! wire's untyped parameter bag. Missing optional fields default explicitly;
//! anything malformed is rejected with a [`ContextError`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use super::answers::Answers;
use super::context::{ActiveContext, ContextName, Parameters, SessionPath};
use super::errors::ContextError;
use crate::domain::catalog::{ServiceCatalog, ServiceId};
use crate::domain::foundation::ValidationError;

const SERVICE: &str = "service";
const QUESTION_INDEX: &str = "question_index";
const ANSWERS: &str = "answers";
const STEP: &str = "step";
const NAME: &str = "name";
const PHONE: &str = "phone";

/// Progress through one service's qualification questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFlowState {
    pub service: ServiceId,
    /// Number of questions already asked; `questions[index - 1]` is pending.
    pub question_index: usize,
    pub answers: Answers,
}

impl QuestionFlowState {
    /// A flow that has not asked anything yet.
    pub fn start(service: ServiceId) -> Self {
        Self {
            service,
            question_index: 0,
            answers: Answers::new(),
        }
    }

    fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params.insert(SERVICE.into(), json!(self.service.as_str()));
        params.insert(QUESTION_INDEX.into(), json!(self.question_index));
        params.insert(ANSWERS.into(), self.answers.to_value());
        params
    }

    fn from_parameters(
        service: ServiceId,
        params: &Parameters,
        catalog: &ServiceCatalog,
    ) -> Result<Self, ContextError> {
        if let Some(declared) = optional_str(params, SERVICE)? {
            let declared: ServiceId = declared.parse()?;
            if declared != service {
                return Err(ContextError::ServiceMismatch {
                    context: service,
                    declared,
                });
            }
        }

        let definition = catalog.get(service);
        let question_index = params
            .get(QUESTION_INDEX)
            .ok_or(ContextError::MissingField(QUESTION_INDEX))
            .and_then(parse_index)?;
        if question_index > definition.question_count() {
            return Err(ContextError::IndexOutOfRange {
                index: question_index,
                count: definition.question_count(),
            });
        }

        let answers = Answers::from_value(params.get(ANSWERS).unwrap_or(&Value::Null), definition)?;

        Ok(Self {
            service,
            question_index,
            answers,
        })
    }
}

/// Which contact field is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStep {
    Name,
    Phone,
    Email,
}

impl ContactStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ContactStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStep {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            other => Err(ValidationError::invalid_format(
                STEP,
                format!("unknown step '{}'", other),
            )),
        }
    }
}

/// Contact-detail collection once every question is answered.
///
/// Fields fill strictly in the order name → phone → email, and `step`
/// always names the next missing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCollectionState {
    pub service: ServiceId,
    pub answers: Answers,
    pub step: ContactStep,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ContactCollectionState {
    /// Collection state right after the last question was answered.
    pub fn begin(service: ServiceId, answers: Answers) -> Self {
        Self {
            service,
            answers,
            step: ContactStep::Name,
            name: None,
            phone: None,
        }
    }

    fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params.insert(SERVICE.into(), json!(self.service.as_str()));
        params.insert(ANSWERS.into(), self.answers.to_value());
        params.insert(STEP.into(), json!(self.step.as_str()));
        if let Some(name) = &self.name {
            params.insert(NAME.into(), json!(name));
        }
        if let Some(phone) = &self.phone {
            params.insert(PHONE.into(), json!(phone));
        }
        params
    }

    fn from_parameters(params: &Parameters, catalog: &ServiceCatalog) -> Result<Self, ContextError> {
        let service: ServiceId = optional_str(params, SERVICE)?
            .ok_or(ContextError::MissingField(SERVICE))?
            .parse()?;
        let step: ContactStep = optional_str(params, STEP)?
            .ok_or(ContextError::MissingField(STEP))?
            .parse()?;
        let name = optional_str(params, NAME)?.map(str::to_string);
        let phone = optional_str(params, PHONE)?.map(str::to_string);

        match step {
            ContactStep::Name if name.is_some() => {
                return Err(ContextError::FieldOutOfOrder { field: NAME, step: "name" })
            }
            ContactStep::Name | ContactStep::Phone if phone.is_some() => {
                return Err(ContextError::FieldOutOfOrder {
                    field: PHONE,
                    step: step.as_str(),
                })
            }
            _ => {}
        }

        let answers = Answers::from_value(
            params.get(ANSWERS).unwrap_or(&Value::Null),
            catalog.get(service),
        )?;

        Ok(Self {
            service,
            answers,
            step,
            name,
            phone,
        })
    }
}

/// Flow state recovered from (or destined for) a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowContext {
    Questions(QuestionFlowState),
    Contact(ContactCollectionState),
}

impl FlowContext {
    pub fn context_name(&self) -> ContextName {
        match self {
            Self::Questions(state) => ContextName::Service(state.service),
            Self::Contact(_) => ContextName::CollectDetails,
        }
    }

    pub fn to_parameters(&self) -> Parameters {
        match self {
            Self::Questions(state) => state.to_parameters(),
            Self::Contact(state) => state.to_parameters(),
        }
    }

    /// Encodes into an outbound context for the next turn.
    pub fn into_context(self, session: &SessionPath, lifespan_count: u32) -> ActiveContext {
        ActiveContext::new(
            session.context_path(self.context_name()),
            lifespan_count,
            self.to_parameters(),
        )
    }

    /// Decodes a caller-supplied context.
    pub fn decode(context: &ActiveContext, catalog: &ServiceCatalog) -> Result<Self, ContextError> {
        match context.kind() {
            Some(ContextName::Service(service)) => {
                QuestionFlowState::from_parameters(service, &context.parameters, catalog)
                    .map(Self::Questions)
            }
            Some(ContextName::CollectDetails) => {
                ContactCollectionState::from_parameters(&context.parameters, catalog)
                    .map(Self::Contact)
            }
            None => Err(ContextError::UnknownContext(context.name.clone())),
        }
    }
}

fn optional_str<'a>(params: &'a Parameters, field: &'static str) -> Result<Option<&'a str>, ContextError> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ContextError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Accepts `3`, `3.0` and `"3"`: platforms relay numbers as floats and
/// sometimes as strings.
fn parse_index(value: &Value) -> Result<usize, ContextError> {
    const WRONG: ContextError = ContextError::WrongType {
        field: QUESTION_INDEX,
        expected: "non-negative integer",
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                usize::try_from(i).map_err(|_| WRONG)
            } else {
                match n.as_f64() {
                    Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as usize),
                    _ => Err(WRONG),
                }
            }
        }
        Value::String(s) => s.trim().parse::<usize>().map_err(|_| WRONG),
        _ => Err(WRONG),
    }
}
