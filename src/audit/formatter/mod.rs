//! Output formatters for audit reports.

pub mod json;
pub mod plain;

use crate::audit::run::{AuditReport, TargetError};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Plain,
    /// JSON output.
    Json,
}

/// Format audit reports, plus the targets that could not be audited, to a string.
pub fn format_reports_to_string(
    reports: &[AuditReport],
    errors: &[TargetError],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Plain => plain::format(reports, errors),
        OutputFormat::Json => json::format(reports, errors),
    }
}
