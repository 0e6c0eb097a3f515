//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::ValidationSummary;
use anyhow::Result;
use console::Term;
use console::style;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn summary_lines(&self, summary: &ValidationSummary) -> Vec<String> {
        let meta = &summary.metadata;
        let mut lines = vec![
            format!("  Created by:        {}", meta.created_by()),
            format!("  CSAR version:      {}", meta.csar_version()),
            format!("  Meta file version: {}", meta.meta_file_version()),
            format!("  Entry definitions: {}", meta.entry_definitions()),
        ];
        if let Some(version) = &summary.tosca_definitions_version {
            lines.push(format!("  TOSCA version:     {version}"));
        }

        let optional = [
            ("Manifest", meta.entry_manifest_file()),
            ("Change log", meta.entry_history_file()),
            ("Tests", meta.entry_tests_dir()),
            ("Licenses", meta.entry_licenses_dir()),
            ("Certificate", meta.entry_certificate_file()),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                lines.push(format!("  {:<18} {value}", format!("{label}:")));
            }
        }

        if self.verbose {
            lines.push(format!("  Files extracted:   {}", summary.files_extracted));
            lines.push(format!("  Directories:       {}", summary.directories_created));
            lines.push(format!(
                "  Total size:        {}",
                Self::format_size(summary.bytes_written)
            ));
            lines.push(format!("  Duration:          {:?}", summary.duration));
        }

        if summary.destination_kept {
            lines.push(format!("  Extracted to:      {}", summary.destination));
        }

        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_validation_result(&self, summary: &ValidationSummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.term.write_line(&format!(
                "{} {} is a valid CSAR",
                style("✓").green().bold(),
                summary.source
            ))?;
        } else {
            self.term
                .write_line(&format!("{} is a valid CSAR", summary.source))?;
        }

        for line in self.summary_lines(summary) {
            self.term.write_line(&line)?;
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let _ = if self.use_colors {
            Term::stderr().write_line(&format!("{} {message}", style("WARNING:").yellow().bold()))
        } else {
            Term::stderr().write_line(&format!("WARNING: {message}"))
        };
    }
}
