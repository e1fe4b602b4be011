//! Report type definitions for operations

use crate::ArtifactKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of fetching one catalog file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Catalog path as declared
    pub path: String,
    pub kind: ArtifactKind,
    /// Where the file was written, when it was
    pub destination: Option<PathBuf>,
    /// Endpoint that served the file
    pub endpoint: Option<String>,
    /// Alias created in the executables directory
    pub alias: Option<PathBuf>,
    /// Last error when the file could not be fetched or written
    pub error: Option<String>,
}

impl FileOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Package-level result of a splice
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpliceReport {
    pub package: String,
    /// Every file was fetched and the package was recorded as installed
    pub success: bool,
    /// Per-file results in catalog order
    pub files: Vec<FileOutcome>,
    /// Reports for dependencies spliced on the way, in the order they ran
    pub dependencies: Vec<SpliceReport>,
    pub duration_ms: u64,
}

impl SpliceReport {
    /// Number of files that failed for this package alone
    #[must_use]
    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| !f.succeeded()).count()
    }

    /// Names of every package touched by this splice, dependencies first
    #[must_use]
    pub fn spliced_order(&self) -> Vec<&str> {
        let mut order = Vec::new();
        for dep in &self.dependencies {
            order.extend(dep.spliced_order());
        }
        order.push(self.package.as_str());
        order
    }
}

/// One package in a full-suite run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteEntry {
    pub package: String,
    pub success: bool,
    /// Error that aborted the package before a report existed
    pub error: Option<String>,
}

/// Result of installing the full suite
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteReport {
    pub version: Option<String>,
    pub succeeded: usize,
    pub total: usize,
    pub packages: Vec<SuiteEntry>,
    pub installed_at: DateTime<Utc>,
    /// Whether the closing save of the state succeeded
    pub state_persisted: bool,
}

impl SuiteReport {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}
