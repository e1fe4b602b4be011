//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum NetworkError {
    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("download failed: {0}")]
    DownloadFailed(String),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error {status} from {url}")]
    HttpError { status: u16, url: String },

    #[error("local source unreadable: {path}: {message}")]
    LocalSourceUnreadable { path: String, message: String },

    #[error("no source endpoints configured")]
    NoEndpoints,

    #[error("{path} unavailable from all {attempts} endpoint(s); last error: {last_error}")]
    AllEndpointsFailed {
        path: String,
        attempts: usize,
        last_error: String,
    },

    #[error("endpoint unreachable: {url}")]
    Unreachable { url: String },
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } | Self::ConnectionRefused(_) | Self::Unreachable { .. } => {
                Some("Check that the mesh endpoint is running, or run `dna status`.")
            }
            Self::NoEndpoints => Some("Configure at least one endpoint under [mesh] endpoints."),
            Self::AllEndpointsFailed { .. } => {
                Some("Verify the file exists on one of the configured endpoints.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::ConnectionRefused(_)
                | Self::DownloadFailed(_)
                | Self::Unreachable { .. }
                | Self::AllEndpointsFailed { .. }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Timeout { .. } => "network.timeout",
            Self::DownloadFailed(_) => "network.download_failed",
            Self::ConnectionRefused(_) => "network.connection_refused",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::HttpError { .. } => "network.http_error",
            Self::LocalSourceUnreadable { .. } => "network.local_source_unreadable",
            Self::NoEndpoints => "network.no_endpoints",
            Self::AllEndpointsFailed { .. } => "network.fetch_failed",
            Self::Unreachable { .. } => "network.unreachable",
        };
        Some(code)
    }
}
