#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for dna
//!
//! Retrieval of package files from the mesh: an ordered list of endpoints,
//! each either an HTTP(S) base URL or a local directory. The first endpoint
//! that returns a complete file wins.

mod client;
mod endpoint;
mod transport;

pub use client::{NetClient, NetConfig};
pub use endpoint::{join_url, parse_url, Location};
pub use transport::Transport;

use dna_errors::{Error, NetworkError};
use dna_events::{AppEvent, EventEmitter, FetchEvent, MeshEvent};

/// A file retrieved from one endpoint
#[derive(Debug, Clone)]
pub struct FetchedSource {
    /// Relative path that was requested
    pub path: String,
    /// Endpoint that served it
    pub endpoint: String,
    /// Full location the bytes came from
    pub location: String,
    pub bytes: Vec<u8>,
}

/// Fetch `relative_path` from the first endpoint that serves it
///
/// Endpoints are tried strictly in order, one attempt each. Nothing is merged
/// across endpoints.
///
/// # Errors
///
/// Returns `NoEndpoints` for an empty list, otherwise `AllEndpointsFailed`
/// carrying the last endpoint's error once every endpoint has failed.
pub async fn fetch_with_fallback<T, E>(
    transport: &T,
    relative_path: &str,
    endpoints: &[String],
    events: &E,
) -> Result<FetchedSource, Error>
where
    T: Transport + ?Sized,
    E: EventEmitter + ?Sized,
{
    if endpoints.is_empty() {
        return Err(NetworkError::NoEndpoints.into());
    }

    let mut last_error = None;
    for endpoint in endpoints {
        let location = join_url(endpoint, relative_path);
        events.emit(AppEvent::Fetch(FetchEvent::Attempt {
            path: relative_path.to_string(),
            endpoint: endpoint.clone(),
        }));

        match transport.fetch(&location).await {
            Ok(bytes) => {
                events.emit(AppEvent::Fetch(FetchEvent::Succeeded {
                    path: relative_path.to_string(),
                    endpoint: endpoint.clone(),
                    bytes: bytes.len() as u64,
                }));
                return Ok(FetchedSource {
                    path: relative_path.to_string(),
                    endpoint: endpoint.clone(),
                    location,
                    bytes,
                });
            }
            Err(e) => {
                tracing::debug!(%location, error = %e, "endpoint failed");
                events.emit(AppEvent::Fetch(FetchEvent::EndpointFailed {
                    path: relative_path.to_string(),
                    endpoint: endpoint.clone(),
                    error: e.to_string(),
                }));
                last_error = Some(e);
            }
        }
    }

    events.emit(AppEvent::Fetch(FetchEvent::Exhausted {
        path: relative_path.to_string(),
        attempts: endpoints.len(),
    }));

    Err(NetworkError::AllEndpointsFailed {
        path: relative_path.to_string(),
        attempts: endpoints.len(),
        last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
    }
    .into())
}

/// Probe one endpoint, reporting the outcome as events
pub async fn probe_endpoint<T, E>(transport: &T, endpoint: &str, events: &E) -> bool
where
    T: Transport + ?Sized,
    E: EventEmitter + ?Sized,
{
    events.emit(AppEvent::Mesh(MeshEvent::ProbeStarted {
        endpoint: endpoint.to_string(),
    }));
    let reachable = transport.probe(endpoint).await;
    events.emit(AppEvent::Mesh(MeshEvent::ProbeCompleted {
        endpoint: endpoint.to_string(),
        reachable,
    }));
    reachable
}
