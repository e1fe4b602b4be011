use serde::{Deserialize, Serialize};

/// Bulk installation of the full suite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SuiteEvent {
    Started {
        version: Option<String>,
        total: usize,
    },

    PackageCompleted {
        package: String,
        success: bool,
        index: usize,
        total: usize,
    },

    Completed { succeeded: usize, total: usize },
}
