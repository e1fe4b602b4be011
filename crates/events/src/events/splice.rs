use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Events emitted while splicing a single package and its dependencies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpliceEvent {
    /// Splice of a package has begun
    Started {
        package: String,
        files: usize,
        dependencies: Vec<String>,
    },

    /// A dependency is about to be spliced on behalf of `package`
    DependencyStarted { package: String, dependency: String },

    /// A dependency was already recorded as spliced and was skipped
    DependencySatisfied { package: String, dependency: String },

    /// A dependency failed; the dependent keeps going
    DependencyFailed {
        package: String,
        dependency: String,
        failure: FailureContext,
    },

    /// One file was written under the lib directory
    FileSpliced {
        package: String,
        path: String,
        destination: PathBuf,
        endpoint: String,
    },

    /// A bin alias was pointed at a spliced executable
    AliasCreated { alias: PathBuf, target: PathBuf },

    /// One file could not be spliced
    FileFailed {
        package: String,
        path: String,
        failure: FailureContext,
    },

    /// Every file of the package landed and state was recorded
    Completed {
        package: String,
        files: usize,
        duration_ms: u64,
    },

    /// Package splice did not complete
    Failed {
        package: String,
        failure: FailureContext,
    },
}
