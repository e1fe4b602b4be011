//! Report types produced by operations

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Reachability of the primary endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Connectivity {
    Online,
    Offline,
    /// No endpoint configured
    Unconfigured,
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "ONLINE"),
            Self::Offline => write!(f, "OFFLINE"),
            Self::Unconfigured => write!(f, "UNCONFIGURED"),
        }
    }
}

/// Snapshot of the local installation and the mesh
#[derive(Clone, Debug, Serialize)]
pub struct StatusReport {
    pub home: PathBuf,
    pub state_file: PathBuf,
    pub endpoints: Vec<String>,
    pub primary_endpoint: Option<String>,
    pub connectivity: Connectivity,
    pub spliced: Vec<String>,
    pub installed_count: usize,
    pub catalog_size: usize,
    /// Suite version of the last full install
    pub omega_version: Option<String>,
    pub installed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
