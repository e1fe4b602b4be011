//! Endpoint addressing

use dna_errors::{Error, NetworkError};
use std::path::PathBuf;
use url::Url;

/// Where a joined location points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Http(Url),
    Local(PathBuf),
}

impl Location {
    /// Classify a location string
    ///
    /// `http://` and `https://` are fetched over the network, `file://` URLs
    /// and scheme-less strings are read from disk.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` for malformed URLs or unsupported schemes.
    pub fn parse(location: &str) -> Result<Self, Error> {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return parse_url(location).map(Self::Http);
        }
        if lower.starts_with("file://") {
            let url = parse_url(location)?;
            return url
                .to_file_path()
                .map(Self::Local)
                .map_err(|()| NetworkError::InvalidUrl(location.to_string()).into());
        }
        if location.contains("://") {
            return Err(NetworkError::InvalidUrl(format!("unsupported scheme: {location}")).into());
        }
        Ok(Self::Local(PathBuf::from(location)))
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

/// Join an endpoint and a relative path with exactly one `/` between them
#[must_use]
pub fn join_url(endpoint: &str, relative_path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        relative_path.trim_start_matches('/')
    )
}

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")).into())
}
