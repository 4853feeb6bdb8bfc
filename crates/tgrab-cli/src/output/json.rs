//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use tgrab_core::ExplodeReport;
use tgrab_core::GrabReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExplodeOutput {
    archives_exploded: usize,
    nested_archives: usize,
    entries_skipped: usize,
    warnings: Vec<String>,
}

impl From<&ExplodeReport> for ExplodeOutput {
    fn from(report: &ExplodeReport) -> Self {
        Self {
            archives_exploded: report.archives_exploded,
            nested_archives: report.nested_archives,
            entries_skipped: report.entries_skipped,
            warnings: report.warnings.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_grab_result(&self, report: &GrabReport) -> Result<()> {
        #[derive(Serialize)]
        struct GrabOutput {
            tickets_processed: usize,
            attachments_downloaded: usize,
            attachments_skipped: usize,
            download_failures: usize,
            grabs: Vec<TicketGrabs>,
            explode: ExplodeOutput,
            warnings: Vec<String>,
        }

        #[derive(Serialize)]
        struct TicketGrabs {
            ticket_dir: String,
            attachments: Vec<String>,
        }

        let data = GrabOutput {
            tickets_processed: report.tickets_processed,
            attachments_downloaded: report.attachments_downloaded,
            attachments_skipped: report.attachments_skipped,
            download_failures: report.download_failures,
            grabs: report
                .grabs
                .iter()
                .map(|(dir, attachments)| TicketGrabs {
                    ticket_dir: dir.display().to_string(),
                    attachments: attachments
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect(),
                })
                .collect(),
            explode: ExplodeOutput::from(&report.explode),
            warnings: report.warnings.clone(),
        };

        let output = JsonOutput::success("grab", data);
        Self::output(&output)
    }

    fn format_explode_result(&self, report: &ExplodeReport) -> Result<()> {
        let output = JsonOutput::success("explode", ExplodeOutput::from(report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
