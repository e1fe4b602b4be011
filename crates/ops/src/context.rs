//! Operations context for dependency injection

use dna_catalog::Catalog;
use dna_config::{Config, DnaPaths};
use dna_errors::{Error, OpsError};
use dna_events::{EventEmitter, EventSender};
use dna_install::Installer;
use dna_net::Transport;
use dna_state::{InstallState, StateStore};
use std::sync::Arc;

/// Operations context providing access to all components
pub struct OpsCtx {
    pub paths: DnaPaths,
    pub catalog: Arc<Catalog>,
    /// Fetch and probe transport
    pub transport: Arc<dyn Transport>,
    pub store: StateStore,
    pub installer: Installer,
    /// Event sender for progress reporting
    pub tx: EventSender,
    pub config: Config,
}

impl OpsCtx {
    /// Load install state as recorded on disk
    pub async fn load_state(&self) -> InstallState {
        self.store.load(self).await
    }

    /// Endpoints fetches and probes go to: configured pins, else the recorded ones
    #[must_use]
    pub fn effective_endpoints<'a>(&'a self, state: &'a InstallState) -> &'a [String] {
        self.config
            .pinned_endpoints()
            .unwrap_or(state.endpoints.as_slice())
    }
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
pub struct OpsContextBuilder {
    paths: Option<DnaPaths>,
    catalog: Option<Arc<Catalog>>,
    transport: Option<Arc<dyn Transport>>,
    store: Option<StateStore>,
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: None,
            catalog: None,
            transport: None,
            store: None,
            tx: None,
            config: None,
        }
    }

    #[must_use]
    pub fn with_paths(mut self, paths: DnaPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set state store; defaults to the state file under the paths
    #[must_use]
    pub fn with_store(mut self, store: StateStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let config = self.config.unwrap_or_default();

        let paths = self.paths.ok_or_else(|| missing("paths"))?;
        let catalog = self.catalog.ok_or_else(|| missing("catalog"))?;
        let transport = self.transport.ok_or_else(|| missing("transport"))?;
        let tx = self.tx.ok_or_else(|| missing("event_sender"))?;

        let store = self
            .store
            .unwrap_or_else(|| StateStore::for_paths(&paths, config.default_endpoints()));

        let installer = Installer::new(
            catalog.clone(),
            transport.clone(),
            paths.clone(),
            store.clone(),
        )
        .with_endpoint_override(config.pinned_endpoints().map(<[String]>::to_vec))
        .with_event_sender(tx.clone());

        Ok(OpsCtx {
            paths,
            catalog,
            transport,
            store,
            installer,
            tx,
            config,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(component: &str) -> Error {
    OpsError::MissingComponent {
        component: component.to_string(),
    }
    .into()
}
