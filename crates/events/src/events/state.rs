use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Persistent install-state events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// Existing state file was read
    Loaded { path: PathBuf, packages: usize },

    /// No state file existed; defaults were used
    Initialized { path: PathBuf },

    /// State written to disk
    Saved { path: PathBuf, packages: usize },

    /// State could not be written
    SaveFailed {
        path: PathBuf,
        failure: FailureContext,
    },
}
