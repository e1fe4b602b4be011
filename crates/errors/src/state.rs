//! State persistence error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum StateError {
    #[error("failed to persist state to {path}: {message}")]
    PersistFailed { path: String, message: String },

    #[error("failed to serialize state: {message}")]
    SerializeFailed { message: String },

    #[error("state corrupted at {path}: {message}")]
    StateCorrupted { path: String, message: String },
}

impl UserFacingError for StateError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PersistFailed { .. } => Some(
                "The package files may be present but were not recorded. Ensure the dna home directory is writable and splice again.",
            ),
            Self::StateCorrupted { .. } => {
                Some("Remove or repair the state file; it will be recreated with defaults.")
            }
            Self::SerializeFailed { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::PersistFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::PersistFailed { .. } => "state.persist_failed",
            Self::SerializeFailed { .. } => "state.serialize_failed",
            Self::StateCorrupted { .. } => "state.corrupted",
        };
        Some(code)
    }
}
