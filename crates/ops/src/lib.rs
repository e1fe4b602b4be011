#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for dna
//!
//! This crate sits between the CLI and the component crates. Every operation
//! takes an [`OpsCtx`], reloads install state, and returns a report the CLI
//! renders as text or JSON.

mod context;
mod query;
mod splice;
mod types;

pub use context::{OpsContextBuilder, OpsCtx};
pub use query::{is_package, list_packages, status};
pub use splice::{install_all, splice};
pub use types::{Connectivity, StatusReport};

use dna_errors::Error;
use dna_types::{PackageInfo, SpliceReport, SuiteReport};

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// Catalog listing
    PackageList(Vec<PackageInfo>),
    /// Single package splice
    SpliceReport(SpliceReport),
    /// Full-suite install
    SuiteReport(SuiteReport),
    /// Installation and mesh status
    Status(StatusReport),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be serialized.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| {
            dna_errors::OpsError::SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Check if this is a success result
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::PackageList(_) | OperationResult::Status(_) => true,
            OperationResult::SpliceReport(report) => report.success,
            OperationResult::SuiteReport(report) => {
                report.all_succeeded() && report.state_persisted
            }
        }
    }
}
