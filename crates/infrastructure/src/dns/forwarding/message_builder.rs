//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dnsq_domain::{DnsClass, DomainError, QueryOptions, RecordType};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::domain::Label;
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// UDP payload size advertised in the OPT record (DNS flag day 2020).
const EDNS_PAYLOAD: u16 = 1232;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a standard recursive query (RD set, single question, class IN)
    /// and return its ID along with the wire bytes.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        Self::build(domain, record_type, &QueryOptions::default())
    }

    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        Self::build_query_with_id(domain, record_type).map(|(_, bytes)| bytes)
    }

    /// Same as [`build_query_with_id`](Self::build_query_with_id) with the
    /// class, RD bit and EDNS DO bit taken from `options`.
    pub fn build_query_with_options(
        domain: &str,
        record_type: &RecordType,
        options: &QueryOptions,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        Self::build(domain, record_type, options)
    }

    /// Build an AXFR request for `zone`.
    ///
    /// RD is left clear: a zone transfer is answered by the authoritative
    /// server itself, never by recursion.
    pub fn build_axfr(zone: &str) -> Result<(u16, Vec<u8>), DomainError> {
        Self::build(zone, &RecordType::AXFR, &QueryOptions::zone_transfer())
    }

    fn build(
        domain: &str,
        record_type: &RecordType,
        options: &QueryOptions,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Self::parse_name(domain).map_err(|reason| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, reason))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(match options.class {
            DnsClass::IN => DNSClass::IN,
            DnsClass::CH => DNSClass::CH,
            DnsClass::HS => DNSClass::HS,
        });

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(options.recursion_desired);
        message.add_query(query);

        if options.dnssec_ok {
            let mut edns = Edns::new();
            edns.set_max_payload(EDNS_PAYLOAD);
            edns.set_dnssec_ok(true);
            message.set_edns(edns);
        }

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Parses a name in the presentation form hickory prints owners in.
    ///
    /// Label bytes are kept verbatim, so case survives and escaped bytes
    /// (`\.`, `\ooo` in octal, as hickory writes them) round-trip. Labels
    /// with non-ASCII characters go through IDNA.
    fn parse_name(domain: &str) -> Result<Name, String> {
        let domain = domain.trim();
        if domain.is_empty() || domain == "." {
            return Ok(Name::root());
        }

        let mut labels: Vec<Label> = Vec::new();
        let mut current: Vec<u8> = Vec::new();
        let mut unicode = false;
        let mut chars = domain.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    labels.push(Self::finish_label(&current, unicode)?);
                    current.clear();
                    unicode = false;
                }
                '\\' => match chars.next() {
                    Some(d) if d.is_ascii_digit() => {
                        let mut value = d.to_digit(8).ok_or("bad octal escape")?;
                        for _ in 0..2 {
                            let next = chars
                                .next()
                                .and_then(|c| c.to_digit(8))
                                .ok_or("bad octal escape")?;
                            value = value * 8 + next;
                        }
                        let byte = u8::try_from(value).map_err(|_| "escape out of range")?;
                        current.push(byte);
                    }
                    Some(escaped) => {
                        let mut utf8 = [0u8; 4];
                        current.extend_from_slice(escaped.encode_utf8(&mut utf8).as_bytes());
                    }
                    None => return Err("trailing backslash".to_string()),
                },
                c if c.is_ascii() => current.push(c as u8),
                c => {
                    unicode = true;
                    let mut utf8 = [0u8; 4];
                    current.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
        }
        if !current.is_empty() {
            labels.push(Self::finish_label(&current, unicode)?);
        }

        Name::from_labels(labels).map_err(|e| e.to_string())
    }

    fn finish_label(bytes: &[u8], unicode: bool) -> Result<Label, String> {
        if bytes.is_empty() {
            return Err("empty label".to_string());
        }
        let label = if unicode {
            Label::from_utf8(&String::from_utf8_lossy(bytes))
        } else {
            Label::from_raw_bytes(bytes)
        };
        label.map_err(|e| e.to_string())
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
