//! Mutating operations

use crate::OpsCtx;
use dna_config::constants::DEFAULT_SUITE_VERSION;
use dna_errors::Error;
use dna_events::EventEmitter;
use dna_types::{SpliceReport, SuiteReport};

/// Splice one package and its missing dependencies
///
/// # Errors
///
/// Returns an error for unknown packages, dependency cycles, directory
/// creation failures, or a failed state save. Incomplete fetches are
/// reported through `SpliceReport::success`.
pub async fn splice(ctx: &OpsCtx, name: &str) -> Result<SpliceReport, Error> {
    let operation = format!("splice {name}");
    ctx.emit_operation_started(&operation);

    let mut state = ctx.load_state().await;
    match ctx.installer.install(name, &mut state).await {
        Ok(report) => {
            ctx.emit_operation_completed(&operation, report.success);
            Ok(report)
        }
        Err(e) => {
            ctx.emit_operation_failed(&operation, e.to_string());
            Err(e)
        }
    }
}

/// Install the catalog's full suite, recording `version`
pub async fn install_all(ctx: &OpsCtx, version: Option<&str>) -> SuiteReport {
    let version = version.unwrap_or(DEFAULT_SUITE_VERSION);
    let operation = format!("install --global {version}");
    ctx.emit_operation_started(&operation);

    let mut state = ctx.load_state().await;
    let report = ctx
        .installer
        .install_all(ctx.catalog.suite(), Some(version), &mut state)
        .await;

    ctx.emit_operation_completed(&operation, report.all_succeeded() && report.state_persisted);
    report
}
