//! HTTP client with request, connect and probe timeouts

use dna_config::Config;
use dna_errors::{Error, NetworkError};
use reqwest::Client;
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub probe_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(3),
            user_agent: format!("dna/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&Config> for NetConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.network.timeout(),
            connect_timeout: config.network.connect_timeout(),
            probe_timeout: config.network.probe_timeout(),
            user_agent: config.user_agent(),
        }
    }
}

/// HTTP client wrapper
///
/// Each request is a single attempt. Falling back is the caller's job since
/// the next endpoint, not the same one again, is what should be tried.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ConnectionRefused(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// GET a URL and return the full body
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, a non-success status,
    /// or if the body cannot be read completely.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| map_reqwest_error(&e, url))
    }

    /// Whether a GET of `url` succeeds within the probe timeout
    pub async fn probe(&self, url: &str) -> bool {
        match self
            .client
            .get(url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url, error = %e, "probe failed");
                false
            }
        }
    }
}

fn map_reqwest_error(e: &reqwest::Error, url: &str) -> Error {
    if e.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
        .into()
    } else if e.is_connect() {
        NetworkError::ConnectionRefused(format!("{url}: {e}")).into()
    } else {
        NetworkError::DownloadFailed(format!("{url}: {e}")).into()
    }
}
