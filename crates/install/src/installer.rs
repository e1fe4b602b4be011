//! Recursive package installation

use crate::fetcher::{fs_error, SourceFetcher};
use chrono::Utc;
use dna_catalog::Catalog;
use dna_config::DnaPaths;
use dna_errors::{Error, InstallError};
use dna_events::{
    AppEvent, EventEmitter, EventSender, FailureContext, SpliceEvent, SuiteEvent,
};
use dna_net::Transport;
use dna_state::{InstallState, StateStore};
use dna_types::{SpliceReport, SuiteEntry, SuiteReport};
use std::sync::Arc;
use std::time::Instant;

/// Splices catalog packages and records them in the state file
#[derive(Clone)]
pub struct Installer {
    catalog: Arc<Catalog>,
    fetcher: SourceFetcher,
    store: StateStore,
    endpoint_override: Option<Vec<String>>,
    event_sender: Option<EventSender>,
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("packages", &self.catalog.len())
            .field("state", &self.store.path())
            .finish_non_exhaustive()
    }
}

impl EventEmitter for Installer {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Installer {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        transport: Arc<dyn Transport>,
        paths: DnaPaths,
        store: StateStore,
    ) -> Self {
        Self {
            catalog,
            fetcher: SourceFetcher::new(transport, paths),
            store,
            endpoint_override: None,
            event_sender: None,
        }
    }

    /// Fetch from `endpoints` instead of the ones recorded in the state
    ///
    /// The recorded endpoints are left untouched, so an override never
    /// reaches the state file.
    #[must_use]
    pub fn with_endpoint_override(mut self, endpoints: Option<Vec<String>>) -> Self {
        self.endpoint_override = endpoints.filter(|e| !e.is_empty());
        self
    }

    /// Set the event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.fetcher = self.fetcher.with_event_sender(sender.clone());
        self.event_sender = Some(sender);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Splice `name` and, first, any dependency not yet recorded as installed
    ///
    /// The requested package itself is always re-fetched even when already
    /// installed; only dependencies are skipped. A dependency whose files fail
    /// does not stop the dependent.
    ///
    /// # Errors
    ///
    /// - `UnknownPackage` if `name` or any dependency reached is not in the catalog
    /// - `CircularDependency` when the walk re-enters a package it is resolving
    /// - `FilesystemError` if the local directories cannot be created
    /// - `PersistFailed` if the state cannot be saved after a full splice
    ///
    /// Unknown names and cycles are found before anything is fetched or
    /// written. File fetch failures are not errors; they show up in the report.
    pub async fn install(
        &self,
        name: &str,
        state: &mut InstallState,
    ) -> Result<SpliceReport, Error> {
        self.check_closure(name, state, &mut Vec::new())?;
        let mut resolving = Vec::new();
        self.install_inner(name, state, &mut resolving).await
    }

    /// Walk the packages an install of `name` would visit, without side effects
    fn check_closure(
        &self,
        name: &str,
        state: &InstallState,
        resolving: &mut Vec<String>,
    ) -> Result<(), Error> {
        if resolving.iter().any(|r| r == name) {
            return Err(circular(resolving, name));
        }
        let spec = self
            .catalog
            .get(name)
            .ok_or_else(|| InstallError::UnknownPackage {
                package: name.to_string(),
            })?;

        resolving.push(name.to_string());
        for dep in spec.dependencies.iter().filter(|d| !state.is_installed(d)) {
            self.check_closure(dep, state, resolving)?;
        }
        resolving.pop();
        Ok(())
    }

    async fn install_inner(
        &self,
        name: &str,
        state: &mut InstallState,
        resolving: &mut Vec<String>,
    ) -> Result<SpliceReport, Error> {
        if resolving.iter().any(|r| r == name) {
            return Err(circular(resolving, name));
        }

        let spec = self
            .catalog
            .get(name)
            .ok_or_else(|| InstallError::UnknownPackage {
                package: name.to_string(),
            })?;

        let started = Instant::now();
        self.emit(AppEvent::Splice(SpliceEvent::Started {
            package: name.to_string(),
            files: spec.files.len(),
            dependencies: spec.dependencies.clone(),
        }));

        resolving.push(name.to_string());
        let mut dependencies = Vec::new();
        for dep in &spec.dependencies {
            if state.is_installed(dep) {
                self.emit(AppEvent::Splice(SpliceEvent::DependencySatisfied {
                    package: name.to_string(),
                    dependency: dep.clone(),
                }));
                continue;
            }

            self.emit(AppEvent::Splice(SpliceEvent::DependencyStarted {
                package: name.to_string(),
                dependency: dep.clone(),
            }));
            let report = Box::pin(self.install_inner(dep, state, resolving)).await?;
            if !report.success {
                self.emit(AppEvent::Splice(SpliceEvent::DependencyFailed {
                    package: name.to_string(),
                    dependency: dep.clone(),
                    failure: incomplete(&report),
                }));
            }
            dependencies.push(report);
        }
        resolving.pop();

        self.ensure_dirs().await?;

        let endpoints = self
            .endpoint_override
            .clone()
            .unwrap_or_else(|| state.endpoints.clone());
        let mut files = Vec::with_capacity(spec.files.len());
        for path in &spec.files {
            files.push(self.fetcher.fetch(name, path, &endpoints).await);
        }

        let mut report = SpliceReport {
            package: name.to_string(),
            success: files.iter().all(dna_types::FileOutcome::succeeded),
            files,
            dependencies,
            duration_ms: 0,
        };

        if report.success {
            let added = state.mark_installed(name);
            if let Err(e) = self.store.save(state, self).await {
                if added {
                    state.unmark_installed(name);
                }
                self.emit_splice_failed(name, &e);
                return Err(e);
            }
        }

        report.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        if report.success {
            self.emit(AppEvent::Splice(SpliceEvent::Completed {
                package: name.to_string(),
                files: report.files.len(),
                duration_ms: report.duration_ms,
            }));
        } else {
            self.emit(AppEvent::Splice(SpliceEvent::Failed {
                package: name.to_string(),
                failure: incomplete(&report),
            }));
        }
        Ok(report)
    }

    async fn ensure_dirs(&self) -> Result<(), Error> {
        for dir in self.fetcher.paths().install_dirs() {
            dna_root::create_dir_all(&dir)
                .await
                .map_err(|e| fs_error("create_dir", &dir, &e))?;
        }
        Ok(())
    }

    /// Splice every package in `names`, in order, then save once
    ///
    /// Stamps the install time and suite version first. Failures of single
    /// packages, including errors, are tallied and the run continues. A
    /// failed closing save is reported through `state_persisted`.
    pub async fn install_all(
        &self,
        names: &[String],
        version: Option<&str>,
        state: &mut InstallState,
    ) -> SuiteReport {
        let installed_at = Utc::now();
        state.stamp_suite(version, installed_at);

        let total = names.len();
        self.emit(AppEvent::Suite(SuiteEvent::Started {
            version: version.map(ToString::to_string),
            total,
        }));

        let mut packages = Vec::with_capacity(total);
        for (index, name) in names.iter().enumerate() {
            let entry = match self.install(name, state).await {
                Ok(report) => SuiteEntry {
                    package: name.clone(),
                    success: report.success,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(package = %name, error = %e, "suite package failed");
                    SuiteEntry {
                        package: name.clone(),
                        success: false,
                        error: Some(e.to_string()),
                    }
                }
            };
            self.emit(AppEvent::Suite(SuiteEvent::PackageCompleted {
                package: name.clone(),
                success: entry.success,
                index: index + 1,
                total,
            }));
            packages.push(entry);
        }

        let state_persisted = match self.store.save(state, self).await {
            Ok(()) => true,
            Err(e) => {
                self.emit_error_with_details("failed to save state after suite install", e.to_string());
                false
            }
        };

        let succeeded = packages.iter().filter(|p| p.success).count();
        self.emit(AppEvent::Suite(SuiteEvent::Completed { succeeded, total }));

        SuiteReport {
            version: version.map(ToString::to_string),
            succeeded,
            total,
            packages,
            installed_at,
            state_persisted,
        }
    }
}

/// Cycle error naming the path from the first visit of `name` back to it
fn circular(resolving: &[String], name: &str) -> Error {
    let mut cycle: Vec<&str> = resolving
        .iter()
        .skip_while(|r| *r != name)
        .map(String::as_str)
        .collect();
    cycle.push(name);
    InstallError::CircularDependency {
        packages: cycle.join(" -> "),
    }
    .into()
}

fn incomplete(report: &SpliceReport) -> FailureContext {
    FailureContext::new(
        Some("install.incomplete"),
        format!(
            "{} of {} file(s) of {} could not be spliced",
            report.failed_files(),
            report.files.len(),
            report.package
        ),
        Some("Check mesh connectivity with `dna status`."),
        true,
    )
}
