use crate::ports::{DnsQueryPort, QueryAnswer};
use dnsq_domain::{DnsProtocol, DomainError, Label, QueryOptions, RecordType};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub server: DnsProtocol,
    pub name: Label,
    pub record_types: Vec<RecordType>,
    pub options: QueryOptions,
    pub timeout: Duration,
}

/// Use case: Ask one upstream about one name, once per requested type
pub struct ResolveQueryUseCase {
    port: Arc<dyn DnsQueryPort>,
}

impl ResolveQueryUseCase {
    pub fn new(port: Arc<dyn DnsQueryPort>) -> Self {
        Self { port }
    }

    pub async fn execute(&self, request: &QueryRequest) -> Result<Vec<QueryAnswer>, DomainError> {
        let record_types: &[RecordType] = if request.record_types.is_empty() {
            &[RecordType::A]
        } else {
            &request.record_types
        };

        if let Some(rt) = record_types.iter().find(|rt| **rt == RecordType::AXFR) {
            return Err(DomainError::ZoneTransferUnsupported(format!(
                "a plain {rt} query; use the zone transfer mode"
            )));
        }

        let mut answers = Vec::with_capacity(record_types.len());
        for record_type in record_types {
            debug!(
                name = %request.name,
                record_type = %record_type,
                class = %request.options.class,
                server = %request.server,
                "Sending query"
            );
            let answer = self
                .port
                .query(
                    &request.server,
                    &request.name,
                    *record_type,
                    request.options,
                    request.timeout,
                )
                .await?;
            answers.push(answer);
        }

        Ok(answers)
    }
}
