use crate::DomainError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    // Basic records
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    PTR,

    // Advanced records
    SRV,
    SOA,
    NS,
    NAPTR,
    SVCB,
    HTTPS,
    DNAME,

    // Security records
    CAA,
    TLSA,
    SSHFP,
    OPENPGPKEY,

    // DNSSEC records
    DS,
    DNSKEY,
    RRSIG,
    NSEC,
    NSEC3,
    NSEC3PARAM,
    CDS,
    CDNSKEY,

    // Legacy/Informational records
    HINFO,
    NULL,

    // Zone transfer meta-queries
    AXFR,
    ANY,

    /// Anything the client has no mnemonic for, kept as its wire number.
    Unknown(u16),
}

impl RecordType {
    /// Convert to wire format number (RFC 1035 and successors)
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::NULL => 10,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::NAPTR => 35,
            RecordType::DNAME => 39,
            RecordType::DS => 43,
            RecordType::SSHFP => 44,
            RecordType::RRSIG => 46,
            RecordType::NSEC => 47,
            RecordType::DNSKEY => 48,
            RecordType::NSEC3 => 50,
            RecordType::NSEC3PARAM => 51,
            RecordType::TLSA => 52,
            RecordType::CDS => 59,
            RecordType::CDNSKEY => 60,
            RecordType::OPENPGPKEY => 61,
            RecordType::SVCB => 64,
            RecordType::HTTPS => 65,
            RecordType::AXFR => 252,
            RecordType::ANY => 255,
            RecordType::CAA => 257,
            RecordType::Unknown(value) => *value,
        }
    }

    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => RecordType::A,
            2 => RecordType::NS,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            10 => RecordType::NULL,
            12 => RecordType::PTR,
            13 => RecordType::HINFO,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            33 => RecordType::SRV,
            35 => RecordType::NAPTR,
            39 => RecordType::DNAME,
            43 => RecordType::DS,
            44 => RecordType::SSHFP,
            46 => RecordType::RRSIG,
            47 => RecordType::NSEC,
            48 => RecordType::DNSKEY,
            50 => RecordType::NSEC3,
            51 => RecordType::NSEC3PARAM,
            52 => RecordType::TLSA,
            59 => RecordType::CDS,
            60 => RecordType::CDNSKEY,
            61 => RecordType::OPENPGPKEY,
            64 => RecordType::SVCB,
            65 => RecordType::HTTPS,
            252 => RecordType::AXFR,
            255 => RecordType::ANY,
            257 => RecordType::CAA,
            other => RecordType::Unknown(other),
        }
    }

    /// NS records mark zone cuts; the traversal follows them.
    pub fn is_delegation(&self) -> bool {
        matches!(self, RecordType::NS)
    }

    /// Meta-types that only make sense as a question, never as data.
    pub fn is_meta(&self) -> bool {
        matches!(self, RecordType::AXFR | RecordType::ANY)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::SOA => "SOA",
            RecordType::NS => "NS",
            RecordType::NAPTR => "NAPTR",
            RecordType::SVCB => "SVCB",
            RecordType::HTTPS => "HTTPS",
            RecordType::DNAME => "DNAME",
            RecordType::CAA => "CAA",
            RecordType::TLSA => "TLSA",
            RecordType::SSHFP => "SSHFP",
            RecordType::OPENPGPKEY => "OPENPGPKEY",
            RecordType::DS => "DS",
            RecordType::DNSKEY => "DNSKEY",
            RecordType::RRSIG => "RRSIG",
            RecordType::NSEC => "NSEC",
            RecordType::NSEC3 => "NSEC3",
            RecordType::NSEC3PARAM => "NSEC3PARAM",
            RecordType::CDS => "CDS",
            RecordType::CDNSKEY => "CDNSKEY",
            RecordType::HINFO => "HINFO",
            RecordType::NULL => "NULL",
            RecordType::AXFR => "AXFR",
            RecordType::ANY => "ANY",
            RecordType::Unknown(value) => return write!(f, "TYPE{value}"),
        };
        f.write_str(name)
    }
}

impl FromStr for RecordType {
    type Err = DomainError;

    /// Accepts mnemonics case-insensitively, plus the RFC 3597 `TYPEnnn` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let parsed = match upper.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::AAAA,
            "CNAME" => RecordType::CNAME,
            "MX" => RecordType::MX,
            "TXT" => RecordType::TXT,
            "PTR" => RecordType::PTR,
            "SRV" => RecordType::SRV,
            "SOA" => RecordType::SOA,
            "NS" => RecordType::NS,
            "NAPTR" => RecordType::NAPTR,
            "SVCB" => RecordType::SVCB,
            "HTTPS" => RecordType::HTTPS,
            "DNAME" => RecordType::DNAME,
            "CAA" => RecordType::CAA,
            "TLSA" => RecordType::TLSA,
            "SSHFP" => RecordType::SSHFP,
            "OPENPGPKEY" => RecordType::OPENPGPKEY,
            "DS" => RecordType::DS,
            "DNSKEY" => RecordType::DNSKEY,
            "RRSIG" => RecordType::RRSIG,
            "NSEC" => RecordType::NSEC,
            "NSEC3" => RecordType::NSEC3,
            "NSEC3PARAM" => RecordType::NSEC3PARAM,
            "CDS" => RecordType::CDS,
            "CDNSKEY" => RecordType::CDNSKEY,
            "HINFO" => RecordType::HINFO,
            "NULL" => RecordType::NULL,
            "AXFR" => RecordType::AXFR,
            "ANY" => RecordType::ANY,
            other => match other.strip_prefix("TYPE").and_then(|n| n.parse::<u16>().ok()) {
                Some(value) => RecordType::from_u16(value),
                None => return Err(DomainError::InvalidRecordType(s.to_string())),
            },
        };
        Ok(parsed)
    }
}
