//! dna - package splicer for the dna::}{::lang organism mesh
//!
//! This is the CLI application. It resolves configuration, wires the
//! component crates into an operations context and renders the results.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use dna_catalog::Catalog;
use dna_config::{Config, DnaPaths};
use dna_errors::{InstallError, OpsError};
use dna_events::EventReceiver;
use dna_net::{NetClient, NetConfig};
use dna_ops::{OperationResult, OpsContextBuilder, OpsCtx};
use dna_state::StateStore;
use dna_types::OutputFormat;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug, &log_dir(&cli.global));

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting dna v{}", env!("CARGO_PKG_VERSION"));

    // Precedence: defaults < file < environment < CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global);

    let json_output = config.general.default_output == OutputFormat::Json;

    let (event_sender, event_receiver) = dna_events::channel();

    let ops_ctx = build_ops_context(config.clone(), event_sender).await?;

    let renderer = OutputRenderer::new(json_output, config.general.color);
    let mut event_handler =
        EventHandler::new(renderer.colors_enabled(), cli.global.debug, json_output);

    let result =
        execute_command_with_events(cli.command, ops_ctx, event_receiver, &mut event_handler)
            .await?;

    renderer.render_result(&result)?;

    if !result.is_success() {
        return Err(incomplete_error(&result));
    }

    info!("Command completed successfully");
    Ok(())
}

/// Wire the component crates into an operations context
async fn build_ops_context(
    config: Config,
    event_sender: dna_events::EventSender,
) -> Result<OpsCtx, CliError> {
    let paths = config.dna_paths()?;
    let catalog = Catalog::load_or_builtin(config.catalog.path.as_deref()).await?;
    let transport = Arc::new(NetClient::new(NetConfig::from(&config))?);
    let store = StateStore::for_paths(&paths, config.default_endpoints());

    let ctx = OpsContextBuilder::new()
        .with_paths(paths)
        .with_catalog(catalog)
        .with_transport(transport)
        .with_store(store)
        .with_event_sender(event_sender)
        .with_config(config)
        .build()?;

    Ok(ctx)
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, ops_ctx));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(command: Commands, ctx: OpsCtx) -> Result<OperationResult, CliError> {
    match command {
        Commands::Splice { package } => {
            let report = dna_ops::splice(&ctx, &package).await?;
            Ok(OperationResult::SpliceReport(report))
        }

        Commands::List => {
            let packages = dna_ops::list_packages(&ctx).await;
            Ok(OperationResult::PackageList(packages))
        }

        Commands::Status => {
            let status = dna_ops::status(&ctx).await;
            Ok(OperationResult::Status(status))
        }

        Commands::Install { global, args } => {
            if !global {
                return Err(CliError::InvalidArguments(
                    "install requires --global (-g)".to_string(),
                ));
            }
            let version = Commands::suite_version(&args);
            let report = dna_ops::install_all(&ctx, version).await;
            Ok(OperationResult::SuiteReport(report))
        }

        Commands::External(args) => {
            let Some(name) = args.first() else {
                return Err(CliError::InvalidArguments("missing command".to_string()));
            };
            if !dna_ops::is_package(&ctx, name) {
                return Err(dna_errors::Error::from(InstallError::UnknownPackage {
                    package: name.clone(),
                })
                .into());
            }
            let report = dna_ops::splice(&ctx, name).await?;
            Ok(OperationResult::SpliceReport(report))
        }
    }
}

/// Apply CLI flags on top of file and environment configuration
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(home) = &global.home {
        config.paths.home = Some(home.clone());
    }
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
}

fn incomplete_error(result: &OperationResult) -> CliError {
    match result {
        OperationResult::SpliceReport(report) => dna_errors::Error::from(
            OpsError::SpliceIncomplete {
                package: report.package.clone(),
            },
        )
        .into(),
        OperationResult::SuiteReport(report) if !report.state_persisted => {
            CliError::Incomplete("install state could not be saved".to_string())
        }
        OperationResult::SuiteReport(report) => CliError::Incomplete(format!(
            "{} of {} packages failed",
            report.total - report.succeeded,
            report.total
        )),
        _ => CliError::Incomplete("operation did not complete".to_string()),
    }
}

/// Directory for debug log files, resolved before configuration is loaded
fn log_dir(global: &cli::GlobalArgs) -> PathBuf {
    let home = global
        .home
        .clone()
        .or_else(|| std::env::var_os("DNA_HOME").map(PathBuf::from));
    match home {
        Some(home) => DnaPaths::new(home).logs_dir(),
        None => DnaPaths::user_default().map_or_else(
            |_| std::env::temp_dir().join("dna-logs"),
            |paths| paths.logs_dir(),
        ),
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool, log_dir: &std::path::Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        if let Some(file) = open_log_file(log_dir, json_mode) {
            tracing_subscriber::fmt()
                .json()
                .with_writer(file)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        tracing_subscriber::EnvFilter::new("info,dna=debug,dna_ops=debug")
                    }),
                )
                .init();
            return;
        }
    }

    if json_mode {
        // Keep stdout clean for the JSON result
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

fn open_log_file(log_dir: &std::path::Path, json_mode: bool) -> Option<std::fs::File> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        if !json_mode {
            eprintln!("Warning: Failed to create log directory: {e}");
        }
        return None;
    }

    let log_file = log_dir.join(format!(
        "dna-{}.log",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    ));

    match std::fs::File::create(&log_file) {
        Ok(file) => {
            if !json_mode {
                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Some(file)
        }
        Err(e) => {
            if !json_mode {
                eprintln!("Warning: Failed to create log file: {e}");
            }
            None
        }
    }
}
