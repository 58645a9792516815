use async_trait::async_trait;
use dnsq_domain::{DnsProtocol, DomainError, Label, QueryOptions, RecordType, ZoneRecord};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct QueryAnswer {
    pub name: Label,
    pub record_type: RecordType,
    pub rcode: &'static str,
    pub answers: Vec<ZoneRecord>,
    pub authority: Vec<ZoneRecord>,
    pub additional: Vec<ZoneRecord>,
    pub truncated: bool,
    /// Protocol that produced the final answer (may differ from the
    /// requested one after a TCP fallback).
    pub protocol_used: &'static str,
    pub server: Arc<str>,
    pub elapsed: Duration,
    /// Whole response message in presentation format.
    pub raw_text: String,
}

#[async_trait]
pub trait DnsQueryPort: Send + Sync {
    async fn query(
        &self,
        server: &DnsProtocol,
        name: &Label,
        record_type: RecordType,
        options: QueryOptions,
        timeout: Duration,
    ) -> Result<QueryAnswer, DomainError>;
}
