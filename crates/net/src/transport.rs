//! Retrieval seam between the installer and the outside world

use crate::client::NetClient;
use crate::endpoint::Location;
use async_trait::async_trait;
use dna_errors::{Error, NetworkError};

/// Retrieves whole files and probes endpoints
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the complete content at `location`
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, Error>;

    /// Whether `location` currently answers
    async fn probe(&self, location: &str) -> bool;
}

#[async_trait]
impl Transport for NetClient {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, Error> {
        match Location::parse(location)? {
            Location::Http(url) => self.get_bytes(url.as_str()).await,
            Location::Local(path) => tokio::fs::read(&path).await.map_err(|e| {
                NetworkError::LocalSourceUnreadable {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
                .into()
            }),
        }
    }

    async fn probe(&self, location: &str) -> bool {
        match Location::parse(location) {
            Ok(Location::Http(url)) => NetClient::probe(self, url.as_str()).await,
            Ok(Location::Local(path)) => tokio::fs::metadata(&path).await.is_ok(),
            Err(_) => false,
        }
    }
}
