//! Rendering of answers for stdout.

mod json;
mod pretty;

use dnsq_application::ports::QueryAnswer;
use dnsq_application::use_cases::RecursiveTransferReport;
use dnsq_domain::config::OutputFormat;
use dnsq_domain::{Label, ZoneRecord};

pub fn render_answers(answers: &[QueryAnswer], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::answers(answers)),
        OutputFormat::Json => json::answers(answers),
        OutputFormat::Raw => Ok(answers
            .iter()
            .map(|a| a.raw_text.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

/// Single-zone AXFR output. `raw` prints the same record lines as `pretty`.
pub fn render_transfer(
    zone: &Label,
    server: &str,
    records: &[ZoneRecord],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => json::records(records),
        OutputFormat::Pretty => Ok(pretty::transfer(zone, server, records)),
        OutputFormat::Raw => Ok(pretty::record_lines(records)),
    }
}

pub fn render_report(report: &RecursiveTransferReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => json::report(report),
        OutputFormat::Pretty | OutputFormat::Raw => Ok(pretty::report(report)),
    }
}
