//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use tgrab_core::ExplodeReport;
use tgrab_core::GrabReport;

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

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    /// Contained failures are diagnostics: shown with --verbose, silent
    /// otherwise.
    fn write_warnings(&self, warnings: &[String]) {
        if !self.verbose || warnings.is_empty() {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style("Warnings:").yellow().bold()));
        } else {
            let _ = self.term.write_line("Warnings:");
        }
        for warning in warnings {
            let _ = self.term.write_line(&format!("  - {warning}"));
        }
    }

    fn write_explode_lines(&self, report: &ExplodeReport) {
        let _ = self.term.write_line(&format!(
            "  Archives exploded: {}",
            report.archives_exploded
        ));
        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Nested archives:   {}", report.nested_archives));
            if report.entries_skipped > 0 {
                let _ = self.term.write_line(&format!(
                    "  Entries skipped:   {}",
                    report.entries_skipped
                ));
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_grab_result(&self, report: &GrabReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Grab complete");
        let _ = self
            .term
            .write_line(&format!("  Tickets:           {}", report.tickets_processed));
        let _ = self.term.write_line(&format!(
            "  Downloaded:        {}",
            report.attachments_downloaded
        ));
        let _ = self.term.write_line(&format!(
            "  Already present:   {}",
            report.attachments_skipped
        ));
        if report.download_failures > 0 {
            let _ = self.term.write_line(&format!(
                "  Failed downloads:  {}",
                report.download_failures
            ));
        }
        self.write_explode_lines(&report.explode);

        if self.verbose && !report.grabs.is_empty() {
            let _ = self.term.write_line("");
            for (ticket_dir, attachments) in &report.grabs {
                let _ = self.term.write_line(&format!("{}", ticket_dir.display()));
                for attachment in attachments {
                    let _ = self.term.write_line(&format!("  {}", attachment.display()));
                }
            }
        }

        let mut warnings = report.warnings.clone();
        warnings.extend(report.explode.warnings.iter().cloned());
        self.write_warnings(&warnings);

        Ok(())
    }

    fn format_explode_result(&self, report: &ExplodeReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Explode complete");
        self.write_explode_lines(report);
        self.write_warnings(&report.warnings);

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
