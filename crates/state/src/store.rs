//! Loading and saving the state file

use crate::models::InstallState;
use chrono::Utc;
use dna_config::DnaPaths;
use dna_errors::{Error, StateError};
use dna_events::{AppEvent, EventEmitter, FailureContext, StateEvent};
use std::path::{Path, PathBuf};

/// Reads and durably writes [`InstallState`]
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    default_endpoints: Vec<String>,
}

impl StateStore {
    #[must_use]
    pub fn new(path: PathBuf, default_endpoints: Vec<String>) -> Self {
        Self {
            path,
            default_endpoints,
        }
    }

    /// Store for the state file of a directory layout
    #[must_use]
    pub fn for_paths(paths: &DnaPaths, default_endpoints: Vec<String>) -> Self {
        Self::new(paths.state_file(), default_endpoints)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// State used when nothing usable is on disk
    #[must_use]
    pub fn default_state(&self) -> InstallState {
        InstallState::new(self.default_endpoints.clone())
    }

    /// Load state, falling back to defaults
    ///
    /// A missing file yields defaults silently. An unreadable or malformed
    /// file yields defaults with a warning; the bad file is left in place
    /// until the next save replaces it.
    pub async fn load<E: EventEmitter + ?Sized>(&self, events: &E) -> InstallState {
        match self.read().await {
            Ok(Some(state)) => {
                events.emit(AppEvent::State(StateEvent::Loaded {
                    path: self.path.clone(),
                    packages: state.installed_count(),
                }));
                state
            }
            Ok(None) => {
                events.emit(AppEvent::State(StateEvent::Initialized {
                    path: self.path.clone(),
                }));
                self.default_state()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "state file unusable, using defaults");
                events.emit_warning_with_context(
                    "state file unusable, starting from defaults",
                    e.to_string(),
                );
                self.default_state()
            }
        }
    }

    /// Read the state file strictly
    ///
    /// # Errors
    ///
    /// Returns `StateCorrupted` if the file exists but cannot be read or parsed.
    pub async fn read(&self) -> Result<Option<InstallState>, Error> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StateError::StateCorrupted {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                }
                .into())
            }
        };

        let mut state: InstallState =
            serde_json::from_str(&contents).map_err(|e| StateError::StateCorrupted {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        state.normalize(&self.default_endpoints);
        Ok(Some(state))
    }

    /// Stamp `updated_at` and write the state durably
    ///
    /// The parent directory is created if needed. The file is written to a
    /// temporary sibling and renamed over the target.
    ///
    /// # Errors
    ///
    /// Returns `PersistFailed` if the record cannot be written.
    pub async fn save<E: EventEmitter + ?Sized>(
        &self,
        state: &mut InstallState,
        events: &E,
    ) -> Result<(), Error> {
        state.updated_at = Some(Utc::now());

        let result = self.write(state).await;
        match &result {
            Ok(()) => events.emit(AppEvent::State(StateEvent::Saved {
                path: self.path.clone(),
                packages: state.installed_count(),
            })),
            Err(e) => events.emit(AppEvent::State(StateEvent::SaveFailed {
                path: self.path.clone(),
                failure: FailureContext::from_error(e),
            })),
        }
        result
    }

    async fn write(&self, state: &InstallState) -> Result<(), Error> {
        let mut json =
            serde_json::to_string_pretty(state).map_err(|e| StateError::SerializeFailed {
                message: e.to_string(),
            })?;
        json.push('\n');

        dna_root::write_atomic(&self.path, json.as_bytes())
            .await
            .map_err(|e| {
                StateError::PersistFailed {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                }
                .into()
            })
    }
}
