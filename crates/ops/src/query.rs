//! Read-only operations

use crate::types::{Connectivity, StatusReport};
use crate::OpsCtx;
use dna_events::EventEmitter;
use dna_net::probe_endpoint;
use dna_types::PackageInfo;

/// Every catalog package with its installed flag, in catalog order
pub async fn list_packages(ctx: &OpsCtx) -> Vec<PackageInfo> {
    ctx.emit_operation_started("list");
    let state = ctx.load_state().await;

    let packages: Vec<PackageInfo> = ctx
        .catalog
        .iter()
        .map(|spec| PackageInfo::from_spec(spec, state.is_installed(&spec.name)))
        .collect();

    ctx.emit_operation_completed("list", true);
    packages
}

/// Installation summary plus a probe of the primary endpoint
///
/// An unreachable endpoint is reported, never raised.
pub async fn status(ctx: &OpsCtx) -> StatusReport {
    ctx.emit_operation_started("status");
    let state = ctx.load_state().await;
    let endpoints = ctx.effective_endpoints(&state);
    let primary = endpoints.first().map(String::as_str);

    let connectivity = match primary {
        Some(primary) => {
            if probe_endpoint(ctx.transport.as_ref(), primary, ctx).await {
                Connectivity::Online
            } else {
                Connectivity::Offline
            }
        }
        None => Connectivity::Unconfigured,
    };

    let report = StatusReport {
        home: ctx.paths.home().to_path_buf(),
        state_file: ctx.store.path().to_path_buf(),
        primary_endpoint: primary.map(ToString::to_string),
        endpoints: endpoints.to_vec(),
        connectivity,
        installed_count: state.installed_count(),
        spliced: state.spliced.clone(),
        catalog_size: ctx.catalog.len(),
        omega_version: state.omega_version.clone(),
        installed_at: state.installed_at,
        updated_at: state.updated_at,
    };

    ctx.emit_operation_completed("status", true);
    report
}

/// Whether `name` is a catalog package
#[must_use]
pub fn is_package(ctx: &OpsCtx, name: &str) -> bool {
    ctx.catalog.contains(name)
}
