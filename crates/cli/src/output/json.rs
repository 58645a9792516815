use dnsq_application::ports::QueryAnswer;
use dnsq_application::use_cases::RecursiveTransferReport;
use dnsq_domain::ZoneRecord;
use serde::Serialize;

#[derive(Serialize)]
struct RecordDto<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    record_type: String,
    ttl: u32,
    data: &'a str,
}

impl<'a> From<&'a ZoneRecord> for RecordDto<'a> {
    fn from(record: &'a ZoneRecord) -> Self {
        Self {
            name: record.owner.as_str(),
            record_type: record.record_type.to_string(),
            ttl: record.ttl,
            data: &record.data,
        }
    }
}

#[derive(Serialize)]
struct AnswerDto<'a> {
    server: &'a str,
    protocol: &'static str,
    name: &'a str,
    #[serde(rename = "type")]
    record_type: String,
    rcode: &'static str,
    truncated: bool,
    elapsed_ms: u64,
    answers: Vec<RecordDto<'a>>,
    authority: Vec<RecordDto<'a>>,
}

#[derive(Serialize)]
struct FailedZoneDto<'a> {
    zone: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct ReportDto<'a> {
    directory: String,
    records: usize,
    zones: Vec<&'a str>,
    files: Vec<String>,
    failed: Vec<FailedZoneDto<'a>>,
}

pub(super) fn answers(answers: &[QueryAnswer]) -> anyhow::Result<String> {
    let dtos: Vec<AnswerDto> = answers
        .iter()
        .map(|a| AnswerDto {
            server: &a.server,
            protocol: a.protocol_used,
            name: a.name.as_str(),
            record_type: a.record_type.to_string(),
            rcode: a.rcode,
            truncated: a.truncated,
            elapsed_ms: a.elapsed.as_millis() as u64,
            answers: a.answers.iter().map(RecordDto::from).collect(),
            authority: a.authority.iter().map(RecordDto::from).collect(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&dtos)?)
}

pub(super) fn records(records: &[ZoneRecord]) -> anyhow::Result<String> {
    let dtos: Vec<RecordDto> = records.iter().map(RecordDto::from).collect();
    Ok(serde_json::to_string_pretty(&dtos)?)
}

pub(super) fn report(report: &RecursiveTransferReport) -> anyhow::Result<String> {
    let dto = ReportDto {
        directory: report.run_dir.display().to_string(),
        records: report.records.len(),
        zones: report.visited.iter().map(|z| z.as_str()).collect(),
        files: report
            .zone_files
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        failed: report
            .failed
            .iter()
            .map(|f| FailedZoneDto {
                zone: f.zone.as_str(),
                reason: &f.reason,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&dto)?)
}
