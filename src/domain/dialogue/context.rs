//! Context Codec - typed view over the contexts the caller round-trips.
//!
//! The server keeps no session storage. Every turn the NLU platform sends back
//! the contexts emitted on the previous turn, each with a remaining-turns
//! counter (`lifespanCount`). A context only counts as *active* while that
//! counter is above zero.

use std::fmt;

use crate::domain::catalog::ServiceId;

/// Untyped parameter bag exactly as it appears on the wire.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

const CONTEXT_SUFFIX: &str = "-context";
const COLLECT_DETAILS_MARKER: &str = "collect-details";

/// Opaque session path assigned by the NLU platform
/// (e.g. `projects/acme/agent/sessions/123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionPath(String);

impl SessionPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified context name: `{session}/contexts/{stem}-context`.
    pub fn context_path(&self, name: ContextName) -> String {
        format!("{}/contexts/{}", self.0, name.short_name())
    }
}

impl fmt::Display for SessionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The context kinds this dialogue understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextName {
    /// Question flow for one service (`website-context`, ...).
    Service(ServiceId),
    /// Contact-detail collection after the questions are answered.
    CollectDetails,
}

impl ContextName {
    /// Unqualified name, e.g. `mobile-app-context`.
    pub fn short_name(&self) -> String {
        match self {
            Self::Service(id) => format!("{}{}", id.as_str(), CONTEXT_SUFFIX),
            Self::CollectDetails => format!("{}{}", COLLECT_DETAILS_MARKER, CONTEXT_SUFFIX),
        }
    }

    /// Recognises a context from the last segment of its name.
    ///
    /// Service contexts must match a catalog id exactly; the collect-details
    /// context is recognised by its marker anywhere in the name.
    pub fn parse(short_name: &str) -> Option<Self> {
        let lowered = short_name.to_ascii_lowercase();
        if lowered.contains(COLLECT_DETAILS_MARKER) {
            return Some(Self::CollectDetails);
        }
        let stem = lowered.strip_suffix(CONTEXT_SUFFIX).unwrap_or(&lowered);
        ServiceId::ALL
            .into_iter()
            .find(|id| id.as_str() == stem)
            .map(Self::Service)
    }
}

/// A named, counted parameter bag owned by the caller between turns.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveContext {
    /// Fully qualified name as sent by the platform.
    pub name: String,
    /// Remaining turns before the platform drops the context.
    pub lifespan_count: u32,
    pub parameters: Parameters,
}

impl ActiveContext {
    pub fn new(name: impl Into<String>, lifespan_count: u32, parameters: Parameters) -> Self {
        Self {
            name: name.into(),
            lifespan_count,
            parameters,
        }
    }

    /// A zero-lifespan context, which tells the platform to drop it.
    pub fn expired(session: &SessionPath, name: ContextName) -> Self {
        Self::new(session.context_path(name), 0, Parameters::new())
    }

    /// The same context with lifespan 0, so the platform drops it.
    pub fn to_expired(&self) -> Self {
        Self::new(self.name.clone(), 0, Parameters::new())
    }

    /// Last path segment of the name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn kind(&self) -> Option<ContextName> {
        ContextName::parse(self.short_name())
    }

    pub fn is_active(&self) -> bool {
        self.lifespan_count > 0
    }
}

/// All contexts attached to one inbound request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSet {
    contexts: Vec<ActiveContext>,
}

impl ContextSet {
    pub fn new(contexts: Vec<ActiveContext>) -> Self {
        Self { contexts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveContext> {
        self.contexts.iter()
    }

    /// First active context whose name is a known service, with that service.
    pub fn find_active_service(&self) -> Option<(ServiceId, &ActiveContext)> {
        self.contexts
            .iter()
            .filter(|ctx| ctx.is_active())
            .find_map(|ctx| match ctx.kind() {
                Some(ContextName::Service(id)) => Some((id, ctx)),
                _ => None,
            })
    }

    pub fn has_any_active_service(&self) -> bool {
        self.find_active_service().is_some()
    }

    /// The collect-details context, whether or not it is still active.
    pub fn find_collect_context(&self) -> Option<&ActiveContext> {
        self.contexts
            .iter()
            .find(|ctx| ctx.kind() == Some(ContextName::CollectDetails))
    }

    /// The collect-details context, only while it is active.
    pub fn active_collect_context(&self) -> Option<&ActiveContext> {
        self.find_collect_context().filter(|ctx| ctx.is_active())
    }

    /// True when an active collect-details context belongs to `service`,
    /// which makes any service context for it stale.
    pub fn is_collecting_for(&self, service: ServiceId) -> bool {
        self.active_collect_context()
            .and_then(|ctx| ctx.parameters.get("service"))
            .and_then(|value| value.as_str())
            .and_then(|s| s.parse::<ServiceId>().ok())
            == Some(service)
    }
}

impl FromIterator<ActiveContext> for ContextSet {
    fn from_iter<T: IntoIterator<Item = ActiveContext>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
