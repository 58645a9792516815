use dnsq_application::ports::QueryAnswer;
use dnsq_application::use_cases::RecursiveTransferReport;
use dnsq_domain::{Label, ZoneRecord};
use std::fmt::Write;

pub(super) fn record_lines(records: &[ZoneRecord]) -> String {
    records
        .iter()
        .map(|r| r.text.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn answers(answers: &[QueryAnswer]) -> String {
    let mut out = String::new();
    for answer in answers {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            ";; {} {} from {} over {} in {}ms: {}{}",
            answer.name,
            answer.record_type,
            answer.server,
            answer.protocol_used,
            answer.elapsed.as_millis(),
            answer.rcode,
            if answer.truncated { " (truncated)" } else { "" }
        );
        for record in &answer.answers {
            let _ = writeln!(out, "{}", record.text);
        }
        if answer.answers.is_empty() && !answer.authority.is_empty() {
            let _ = writeln!(out, ";; AUTHORITY");
            for record in &answer.authority {
                let _ = writeln!(out, "{}", record.text);
            }
        }
    }
    out.trim_end().to_string()
}

pub(super) fn transfer(zone: &Label, server: &str, records: &[ZoneRecord]) -> String {
    let mut out = format!(";; AXFR {zone} from {server}: {} records\n", records.len());
    out.push_str(&record_lines(records));
    out.trim_end().to_string()
}

pub(super) fn report(report: &RecursiveTransferReport) -> String {
    let mut out = format!(
        "AXFR complete: {} records from {} zones, written to {}",
        report.records.len(),
        report.visited.len(),
        report.run_dir.display()
    );
    for failed in &report.failed {
        let _ = write!(out, "\n;; skipped {}: {}", failed.zone, failed.reason);
    }
    out
}
