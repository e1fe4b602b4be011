//! Event handling and progress display

use crate::logging::log_event_with_tracing;
use console::{Style, Term};
use dna_events::{
    AppEvent, FetchEvent, GeneralEvent, MeshEvent, SpliceEvent, StateEvent, SuiteEvent,
};
use std::path::Path;

/// Renders progress events while a command runs
pub struct EventHandler {
    term: Term,
    colors_enabled: bool,
    debug_enabled: bool,
    /// JSON mode keeps stdout clean for the final result
    quiet: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            colors_enabled,
            debug_enabled,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);

        if self.quiet {
            return;
        }

        match event {
            AppEvent::Splice(splice_event) => self.handle_splice_event(splice_event),
            AppEvent::Fetch(fetch_event) => self.handle_fetch_event(fetch_event),
            AppEvent::Suite(suite_event) => self.handle_suite_event(suite_event),
            AppEvent::State(StateEvent::SaveFailed { path, failure }) => {
                self.show_error(&format!(
                    "[!] Could not save {}: {}",
                    path.display(),
                    failure.message
                ));
            }
            AppEvent::State(state_event) => {
                if self.debug_enabled {
                    self.show_dim(&format!("    state: {state_event:?}"));
                }
            }
            AppEvent::Mesh(MeshEvent::ProbeStarted { endpoint }) => {
                if self.debug_enabled {
                    self.show_dim(&format!("    probing {endpoint}"));
                }
            }
            AppEvent::Mesh(MeshEvent::ProbeCompleted { .. }) => {}
            AppEvent::General(general_event) => self.handle_general_event(general_event),
        }
    }

    fn handle_splice_event(&self, event: SpliceEvent) {
        match event {
            SpliceEvent::Started { package, .. } => {
                self.show_status(&format!("[*] Splicing {package}..."));
            }
            SpliceEvent::DependencyStarted { dependency, .. } => {
                self.show_warning(&format!("    -> Dependency: {dependency}"));
            }
            SpliceEvent::DependencySatisfied { dependency, .. } => {
                self.show_dim(&format!("    -> Dependency: {dependency} (already spliced)"));
            }
            SpliceEvent::DependencyFailed {
                dependency,
                failure,
                ..
            } => {
                self.show_error(&format!(
                    "    [!] Dependency {dependency} failed: {}",
                    failure.message
                ));
            }
            SpliceEvent::FileSpliced { destination, .. } => {
                self.show_success(&format!("    [✓] {}", file_label(&destination)));
            }
            SpliceEvent::AliasCreated { alias, .. } => {
                if self.debug_enabled {
                    self.show_dim(&format!("        linked {}", alias.display()));
                }
            }
            SpliceEvent::FileFailed { path, failure, .. } => {
                self.show_error(&format!("    [!] Failed to fetch {path}: {}", failure.message));
            }
            SpliceEvent::Completed { package, .. } => {
                self.show_success(&format!("[✓] {package} spliced successfully"));
            }
            SpliceEvent::Failed { package, failure } => {
                self.show_error(&format!("[!] {package}: {}", failure.message));
            }
        }
    }

    fn handle_fetch_event(&self, event: FetchEvent) {
        if !self.debug_enabled {
            return;
        }
        match event {
            FetchEvent::Attempt { path, endpoint } => {
                self.show_dim(&format!("    Fetching {endpoint}/{path}..."));
            }
            FetchEvent::EndpointFailed {
                endpoint, error, ..
            } => {
                self.show_dim(&format!("    {endpoint} failed: {error}"));
            }
            FetchEvent::Succeeded { .. } | FetchEvent::Exhausted { .. } => {}
        }
    }

    fn handle_suite_event(&self, event: SuiteEvent) {
        match event {
            SuiteEvent::Started { version, total } => {
                let version = version.unwrap_or_default();
                self.show_status(&format!(
                    "[*] Installing dna::}}{{::lang {version} globally..."
                ));
                self.show_dim(&format!("    This will install {total} core packages."));
                self.blank();
            }
            SuiteEvent::PackageCompleted {
                package,
                success: false,
                index,
                total,
            } => {
                self.show_warning(&format!("    ({index}/{total}) {package} incomplete"));
            }
            SuiteEvent::PackageCompleted { .. } | SuiteEvent::Completed { .. } => {}
        }
    }

    fn handle_general_event(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => match context {
                Some(context) => self.show_warning(&format!("[!] {message} ({context})")),
                None => self.show_warning(&format!("[!] {message}")),
            },
            GeneralEvent::Error { message, details } => {
                self.show_error(&format!("[!] {message}"));
                if let Some(details) = details {
                    self.show_dim(&format!("    {details}"));
                }
            }
            GeneralEvent::DebugLog { message, .. } => {
                if self.debug_enabled {
                    self.show_dim(&format!("    {message}"));
                }
            }
            GeneralEvent::OperationStarted { .. }
            | GeneralEvent::OperationCompleted { .. }
            | GeneralEvent::OperationFailed { .. } => {}
        }
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.colors_enabled)
    }

    fn write(&self, line: &str) {
        // A closed stdout is not worth aborting the operation for
        let _ = self.term.write_line(line);
    }

    fn blank(&self) {
        self.write("");
    }

    fn show_status(&self, message: &str) {
        self.write(&self.style(Style::new().cyan()).apply_to(message).to_string());
    }

    fn show_success(&self, message: &str) {
        self.write(&self.style(Style::new().green()).apply_to(message).to_string());
    }

    fn show_warning(&self, message: &str) {
        self.write(&self.style(Style::new().yellow()).apply_to(message).to_string());
    }

    fn show_error(&self, message: &str) {
        self.write(&self.style(Style::new().red()).apply_to(message).to_string());
    }

    fn show_dim(&self, message: &str) {
        self.write(&self.style(Style::new().dim()).apply_to(message).to_string());
    }
}

fn file_label(destination: &Path) -> String {
    destination.file_name().map_or_else(
        || destination.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_label_uses_file_name() {
        assert_eq!(file_label(&PathBuf::from("/home/u/.dna/lib/aura.py")), "aura.py");
        assert_eq!(file_label(&PathBuf::from("/")), "/");
    }

    #[test]
    fn quiet_handler_accepts_every_domain() {
        let mut handler = EventHandler::new(false, true, true);
        handler.handle_event(AppEvent::Suite(SuiteEvent::Completed {
            succeeded: 1,
            total: 2,
        }));
        handler.handle_event(AppEvent::General(GeneralEvent::warning("careful")));
    }
}
