//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use dna_ops::{Connectivity, OperationResult, StatusReport};
use dna_types::{ColorChoice, PackageInfo, SpliceReport, SuiteReport};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Whether colored output should be produced
    pub fn colors_enabled(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_table(result)
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    /// Render as formatted table
    fn render_table(&self, result: &OperationResult) -> io::Result<()> {
        match result {
            OperationResult::PackageList(packages) => self.render_package_list(packages),
            OperationResult::SpliceReport(report) => self.render_splice_report(report),
            OperationResult::SuiteReport(report) => self.render_suite_report(report),
            OperationResult::Status(status) => self.render_status(status),
        }
    }

    /// Render the catalog with splice status
    fn render_package_list(&self, packages: &[PackageInfo]) -> io::Result<()> {
        self.render_heading("Package Registry")?;

        if packages.is_empty() {
            return self.term.write_line("No packages in catalog.");
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Dependencies").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
        ]);

        for package in packages {
            let deps = if package.dependencies.is_empty() {
                "-".to_string()
            } else {
                package.dependencies.join(", ")
            };

            table.add_row(vec![
                Cell::new(&package.name),
                self.format_installed(package.installed),
                Cell::new(deps),
                Cell::new(&package.description),
            ]);
        }

        self.term.write_line(&table.to_string())
    }

    /// Render the outcome of a single splice
    fn render_splice_report(&self, report: &SpliceReport) -> io::Result<()> {
        let order = report.spliced_order();
        let failed: Vec<_> = collect_failures(report);

        if report.success {
            let line = format!(
                "[✓] {} ready ({} package{}, {} ms)",
                report.package,
                order.len(),
                if order.len() == 1 { "" } else { "s" },
                report.duration_ms
            );
            self.term.write_line(&self.paint(Style::new().green(), &line))?;
        } else {
            let line = format!("[!] {} was not spliced", report.package);
            self.term.write_line(&self.paint(Style::new().red(), &line))?;
        }

        for (package, path, error) in failed {
            self.term
                .write_line(&format!("    {package}: {path}: {error}"))?;
        }
        Ok(())
    }

    /// Render the outcome of a full-suite install
    fn render_suite_report(&self, report: &SuiteReport) -> io::Result<()> {
        self.term.write_line("")?;
        let line = format!(
            "[✓] Installed {}/{} packages",
            report.succeeded, report.total
        );
        let style = if report.all_succeeded() {
            Style::new().green()
        } else {
            Style::new().yellow()
        };
        self.term.write_line(&self.paint(style, &line))?;

        if let Some(version) = &report.version {
            self.term.write_line(&format!("    Version: {version}"))?;
        }

        for entry in report.packages.iter().filter(|e| !e.success) {
            let reason = entry.error.as_deref().unwrap_or("incomplete");
            self.term
                .write_line(&format!("    [!] {}: {reason}", entry.package))?;
        }

        if !report.state_persisted {
            self.term.write_line(&self.paint(
                Style::new().red(),
                "[!] Install state could not be saved",
            ))?;
        }

        self.term.write_line("")?;
        self.term
            .write_line(&self.paint(Style::new().cyan(), "You can now use:"))?;
        self.term.write_line("    dna list")?;
        self.term.write_line("    dna status")
    }

    /// Render installation and mesh status
    fn render_status(&self, status: &StatusReport) -> io::Result<()> {
        self.render_heading("Mesh Status")?;

        let registry = if status.endpoints.is_empty() {
            "not set".to_string()
        } else {
            status.endpoints.join(", ")
        };
        let omega = status.omega_version.as_deref().unwrap_or("not installed");

        self.term.write_line(&format!("  Registry:     {registry}"))?;
        self.term
            .write_line(&format!("  DNA Dir:      {}", status.home.display()))?;
        self.term.write_line(&format!(
            "  Spliced:      {} of {} packages",
            status.installed_count, status.catalog_size
        ))?;
        self.term.write_line(&format!("  Omega:        {omega}"))?;
        if let Some(updated) = status.updated_at {
            self.term.write_line(&format!(
                "  Updated:      {}",
                updated.format("%Y-%m-%d %H:%M:%S UTC")
            ))?;
        }
        self.term.write_line("")?;

        let line = match status.connectivity {
            Connectivity::Online => {
                self.paint(Style::new().green(), "  [✓] Primary mesh: ONLINE")
            }
            Connectivity::Offline => self.paint(Style::new().red(), "  [!] Primary mesh: OFFLINE"),
            Connectivity::Unconfigured => {
                self.paint(Style::new().yellow(), "  [!] No mesh endpoint configured")
            }
        };
        self.term.write_line(&line)
    }

    fn render_heading(&self, title: &str) -> io::Result<()> {
        let heading = format!("dna::}}{{::lang {title}");
        self.term
            .write_line(&self.paint(Style::new().cyan().bold(), &heading))?;
        self.term.write_line(&"=".repeat(40))
    }

    fn format_installed(&self, installed: bool) -> Cell {
        let (label, color) = if installed {
            ("spliced", Color::Green)
        } else {
            ("available", Color::DarkGrey)
        };
        if self.colors_enabled() {
            Cell::new(label).fg(color)
        } else {
            Cell::new(label)
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style
            .force_styling(self.colors_enabled())
            .apply_to(text)
            .to_string()
    }
}

/// Every failed file across a splice tree as (package, path, error)
fn collect_failures(report: &SpliceReport) -> Vec<(&str, &str, &str)> {
    let mut failures = Vec::new();
    for dep in &report.dependencies {
        failures.extend(collect_failures(dep));
    }
    for file in &report.files {
        if let Some(error) = &file.error {
            failures.push((report.package.as_str(), file.path.as_str(), error.as_str()));
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use dna_types::{ArtifactKind, FileOutcome};

    fn outcome(path: &str, error: Option<&str>) -> FileOutcome {
        FileOutcome {
            path: path.to_string(),
            kind: ArtifactKind::classify(path),
            destination: None,
            endpoint: None,
            alias: None,
            error: error.map(ToString::to_string),
        }
    }

    #[test]
    fn failures_are_collected_dependencies_first() {
        let dep = SpliceReport {
            package: "a".to_string(),
            success: false,
            files: vec![outcome("a.py", Some("404"))],
            dependencies: vec![],
            duration_ms: 1,
        };
        let report = SpliceReport {
            package: "b".to_string(),
            success: false,
            files: vec![outcome("b.py", None), outcome("b.dna", Some("timeout"))],
            dependencies: vec![dep],
            duration_ms: 2,
        };

        let failures = collect_failures(&report);
        assert_eq!(
            failures,
            vec![("a", "a.py", "404"), ("b", "b.dna", "timeout")]
        );
    }

    #[test]
    fn never_color_disables_styling() {
        let renderer = OutputRenderer::new(false, ColorChoice::Never);
        assert!(!renderer.colors_enabled());
        assert_eq!(renderer.paint(Style::new().red(), "plain"), "plain");
    }
}
