use super::record_type_map::RecordTypeMapper;
use dnsq_domain::{DomainError, Label, ZoneRecord};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub rcode: ResponseCode,

    pub truncated: bool,

    pub answers: Vec<ZoneRecord>,

    pub authority: Vec<ZoneRecord>,

    pub additional: Vec<ZoneRecord>,

    pub message: Message,
}

impl DnsResponse {
    pub fn id(&self) -> u16 {
        self.message.id()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let answers: Vec<ZoneRecord> = message.answers().iter().map(Self::to_zone_record).collect();
        let authority = message
            .name_servers()
            .iter()
            .map(Self::to_zone_record)
            .collect();
        let additional = message
            .additionals()
            .iter()
            .map(Self::to_zone_record)
            .collect();

        debug!(
            rcode = ?rcode,
            answers = answers.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            rcode,
            truncated,
            answers,
            authority,
            additional,
            message,
        })
    }

    /// Converts a library record into the client's value type, keeping the
    /// library's presentation format as the canonical text.
    pub fn to_zone_record(record: &Record) -> ZoneRecord {
        ZoneRecord::new(
            Label::fqdn(&record.name().to_string()),
            RecordTypeMapper::from_hickory(record.record_type()),
            record.ttl(),
            record.data().to_string(),
            record.to_string(),
        )
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            _ => "UNKNOWN",
        }
    }
}
