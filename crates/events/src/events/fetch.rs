use serde::{Deserialize, Serialize};

/// Source retrieval across the ordered endpoint list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetchEvent {
    /// Trying one endpoint for a relative path
    Attempt { path: String, endpoint: String },

    /// The endpoint could not serve the path
    EndpointFailed {
        path: String,
        endpoint: String,
        error: String,
    },

    /// Content retrieved
    Succeeded {
        path: String,
        endpoint: String,
        bytes: u64,
    },

    /// Every endpoint failed
    Exhausted { path: String, attempts: usize },
}
