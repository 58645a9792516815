use super::{Label, RecordType};
use std::sync::Arc;

/// One resource record as handed back by the protocol layer.
///
/// The client never interprets rdata; it keeps the protocol library's
/// presentation strings and only looks at the owner name and type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub owner: Label,
    pub record_type: RecordType,
    pub ttl: u32,
    /// Rdata in presentation format.
    pub data: Arc<str>,
    /// Whole record in canonical text form (`owner ttl class type rdata`).
    pub text: Arc<str>,
}

impl ZoneRecord {
    pub fn new(
        owner: Label,
        record_type: RecordType,
        ttl: u32,
        data: impl Into<Arc<str>>,
        text: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            owner,
            record_type,
            ttl,
            data: data.into(),
            text: text.into(),
        }
    }

    /// Zone cut introduced by this record, if it is an NS record.
    ///
    /// The cut is the record's own name, not the nameserver host in rdata.
    pub fn delegated_zone(&self) -> Option<&Label> {
        self.record_type.is_delegation().then_some(&self.owner)
    }
}
