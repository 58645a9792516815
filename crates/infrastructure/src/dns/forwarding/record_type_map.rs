use dnsq_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

/// Both enums agree on the IANA wire number, so the mapping goes through it.
/// Types either side has no mnemonic for survive as `Unknown(n)`.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    /// Convert hickory RecordType → domain RecordType (for parsed records)
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
