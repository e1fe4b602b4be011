use serde::{Deserialize, Serialize};

use crate::EventSource;
use dna_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod fetch;
pub mod general;
pub mod mesh;
pub mod splice;
pub mod state;
pub mod suite;

pub use fetch::*;
pub use general::*;
pub use mesh::*;
pub use splice::*;
pub use state::*;
pub use suite::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Package splice progress
    Splice(SpliceEvent),

    /// Endpoint fallback during retrieval
    Fetch(FetchEvent),

    /// State file reads and writes
    State(StateEvent),

    /// Bulk suite installation
    Suite(SuiteEvent),

    /// Endpoint probes
    Mesh(MeshEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Splice(_) => EventSource::SPLICE,
            Self::Fetch(_) => EventSource::FETCH,
            Self::State(_) => EventSource::STATE,
            Self::Suite(_) => EventSource::SUITE,
            Self::Mesh(_) => EventSource::MESH,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Error { .. } | GeneralEvent::OperationFailed { .. })
            | Self::Splice(SpliceEvent::Failed { .. })
            | Self::State(StateEvent::SaveFailed { .. })
            | Self::Fetch(FetchEvent::Exhausted { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Splice(SpliceEvent::FileFailed { .. } | SpliceEvent::DependencyFailed { .. })
            | Self::Suite(SuiteEvent::PackageCompleted { success: false, .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Fetch(FetchEvent::Attempt { .. } | FetchEvent::EndpointFailed { .. })
            | Self::Mesh(MeshEvent::ProbeStarted { .. })
            | Self::State(StateEvent::Loaded { .. } | StateEvent::Initialized { .. }) => {
                Level::DEBUG
            }

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "dna::events::general",
            Self::Splice(_) => "dna::events::splice",
            Self::Fetch(_) => "dna::events::fetch",
            Self::State(_) => "dna::events::state",
            Self::Suite(_) => "dna::events::suite",
            Self::Mesh(_) => "dna::events::mesh",
        }
    }

    /// Get structured fields for logging
    #[must_use]
    pub fn log_fields(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}
