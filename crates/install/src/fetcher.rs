//! Fetch one catalog file and place it in the local layout

use dna_config::DnaPaths;
use dna_errors::{Error, InstallError};
use dna_events::{AppEvent, EventEmitter, EventSender, FailureContext, SpliceEvent};
use dna_net::{fetch_with_fallback, Transport};
use dna_types::{alias_name, base_name, ArtifactKind, FileOutcome};
use std::path::PathBuf;
use std::sync::Arc;

/// Retrieves files through a [`Transport`] and writes them under [`DnaPaths`]
#[derive(Clone)]
pub struct SourceFetcher {
    transport: Arc<dyn Transport>,
    paths: DnaPaths,
    event_sender: Option<EventSender>,
}

impl std::fmt::Debug for SourceFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFetcher")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl EventEmitter for SourceFetcher {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl SourceFetcher {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, paths: DnaPaths) -> Self {
        Self {
            transport,
            paths,
            event_sender: None,
        }
    }

    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    #[must_use]
    pub fn paths(&self) -> &DnaPaths {
        &self.paths
    }

    /// Local destination of a catalog path
    ///
    /// Executables land in the library directory, data artifacts in the
    /// organisms directory, both under their base name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFileEntry` if the path has no base name.
    pub fn destination_for(&self, path: &str) -> Result<(ArtifactKind, PathBuf), Error> {
        let kind = ArtifactKind::classify(path);
        let name = base_name(path).ok_or_else(|| InstallError::InvalidFileEntry {
            path: path.to_string(),
            message: "no file name".to_string(),
        })?;
        let dir = match kind {
            ArtifactKind::Executable => self.paths.lib_dir(),
            ArtifactKind::DataArtifact => self.paths.organisms_dir(),
        };
        Ok((kind, dir.join(name)))
    }

    /// Fetch `path` from the first endpoint that has it and install it
    ///
    /// Never fails: every problem is recorded in the returned outcome.
    pub async fn fetch(&self, package: &str, path: &str, endpoints: &[String]) -> FileOutcome {
        let kind = ArtifactKind::classify(path);
        let mut outcome = FileOutcome {
            path: path.to_string(),
            kind,
            destination: None,
            endpoint: None,
            alias: None,
            error: None,
        };

        if let Err(e) = self.fetch_into(path, endpoints, &mut outcome).await {
            self.emit(AppEvent::Splice(SpliceEvent::FileFailed {
                package: package.to_string(),
                path: path.to_string(),
                failure: FailureContext::from_error(&e),
            }));
            outcome.error = Some(e.to_string());
            return outcome;
        }

        if let (Some(destination), Some(endpoint)) = (&outcome.destination, &outcome.endpoint) {
            self.emit(AppEvent::Splice(SpliceEvent::FileSpliced {
                package: package.to_string(),
                path: path.to_string(),
                destination: destination.clone(),
                endpoint: endpoint.clone(),
            }));
        }
        outcome
    }

    async fn fetch_into(
        &self,
        path: &str,
        endpoints: &[String],
        outcome: &mut FileOutcome,
    ) -> Result<(), Error> {
        let (kind, destination) = self.destination_for(path)?;

        let fetched = fetch_with_fallback(self.transport.as_ref(), path, endpoints, self)
            .await
            .map_err(|e| InstallError::FetchFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        outcome.endpoint = Some(fetched.endpoint);

        dna_root::write_atomic(&destination, &fetched.bytes)
            .await
            .map_err(|e| fs_error("write", &destination, &e))?;
        dna_root::set_mode(&destination, dna_root::EXECUTABLE_MODE)
            .await
            .map_err(|e| fs_error("chmod", &destination, &e))?;
        outcome.destination = Some(destination.clone());

        if kind.is_aliased() {
            if let Some(alias) = alias_name(path) {
                let link = self.paths.bin_dir().join(alias);
                dna_root::replace_symlink(&destination, &link)
                    .await
                    .map_err(|e| fs_error("symlink", &link, &e))?;
                self.emit(AppEvent::Splice(SpliceEvent::AliasCreated {
                    alias: link.clone(),
                    target: destination,
                }));
                outcome.alias = Some(link);
            }
        }

        Ok(())
    }
}

pub(crate) fn fs_error(operation: &str, path: &std::path::Path, e: &Error) -> Error {
    InstallError::FilesystemError {
        operation: operation.to_string(),
        path: path.display().to_string(),
        message: e.to_string(),
    }
    .into()
}
