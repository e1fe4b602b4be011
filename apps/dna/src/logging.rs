//! Structured logging integration for events
//!
//! Every [`AppEvent`] drained by the CLI is mirrored into tracing so debug log
//! files carry the full splice history, independent of what the terminal
//! renderer chooses to show.

use dna_events::{AppEvent, FetchEvent, GeneralEvent, SpliceEvent, StateEvent, SuiteEvent};
use tracing::{debug, error, info, trace, warn, Level};

/// Dispatch a tracing macro on a runtime level
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            Level::ERROR => error!($($arg)+),
            Level::WARN => warn!($($arg)+),
            Level::INFO => info!($($arg)+),
            Level::DEBUG => debug!($($arg)+),
            Level::TRACE => trace!($($arg)+),
        }
    };
}

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let source = event.event_source();
    let source = source.as_str();
    let level = event.log_level();

    match event {
        AppEvent::Splice(splice_event) => match splice_event {
            SpliceEvent::Started {
                package,
                files,
                dependencies,
            } => {
                info!(
                    source,
                    package = %package,
                    files = files,
                    dependencies = ?dependencies,
                    "Splice started"
                );
            }
            SpliceEvent::FileSpliced {
                package,
                path,
                destination,
                endpoint,
            } => {
                info!(
                    source,
                    package = %package,
                    path = %path,
                    destination = %destination.display(),
                    endpoint = %endpoint,
                    "File spliced"
                );
            }
            SpliceEvent::FileFailed {
                package,
                path,
                failure,
            } => {
                warn!(
                    source,
                    package = %package,
                    path = %path,
                    code = ?failure.code,
                    message = %failure.message,
                    retryable = failure.retryable,
                    "File failed"
                );
            }
            SpliceEvent::Completed {
                package,
                files,
                duration_ms,
            } => {
                info!(
                    source,
                    package = %package,
                    files = files,
                    duration_ms = duration_ms,
                    "Splice completed"
                );
            }
            SpliceEvent::Failed { package, failure } => {
                error!(
                    source,
                    package = %package,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Splice failed"
                );
            }
            other => {
                log_at!(level, source, event = ?other, "Splice event");
            }
        },

        AppEvent::Fetch(fetch_event) => match fetch_event {
            FetchEvent::EndpointFailed {
                path,
                endpoint,
                error,
            } => {
                debug!(
                    source,
                    path = %path,
                    endpoint = %endpoint,
                    error = %error,
                    "Endpoint failed"
                );
            }
            FetchEvent::Exhausted { path, attempts } => {
                error!(source, path = %path, attempts = attempts, "All endpoints failed");
            }
            other => {
                log_at!(level, source, event = ?other, "Fetch event");
            }
        },

        AppEvent::State(StateEvent::SaveFailed { path, failure }) => {
            error!(
                source,
                path = %path.display(),
                code = ?failure.code,
                message = %failure.message,
                "State save failed"
            );
        }

        AppEvent::Suite(SuiteEvent::Completed { succeeded, total }) => {
            info!(
                source,
                succeeded = succeeded,
                total = total,
                "Suite install completed"
            );
        }

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Warning { message, context } => {
                warn!(source, message = %message, context = ?context, "Warning");
            }
            GeneralEvent::Error { message, details } => {
                error!(source, message = %message, details = ?details, "Error");
            }
            GeneralEvent::DebugLog { message, context } => {
                debug!(source, message = %message, context = ?context, "Debug log");
            }
            GeneralEvent::OperationFailed { operation, error } => {
                error!(source, operation = %operation, error = %error, "Operation failed");
            }
            other => {
                log_at!(level, source, event = ?other, "General event");
            }
        },

        _ => {
            log_at!(level, source, fields = %event.log_fields(), "Application event");
        }
    }
}
