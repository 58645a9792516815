use crate::dns::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport;
use async_trait::async_trait;
use dnsq_application::ports::{DnsQueryPort, QueryAnswer};
use dnsq_domain::{DnsProtocol, DomainError, Label, QueryOptions, RecordType};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sends ordinary queries to the upstream named on the command line.
///
/// A truncated UDP answer is retried once over TCP against the same server
/// with whatever is left of the timeout.
#[derive(Default)]
pub struct UpstreamQueryClient;

impl UpstreamQueryClient {
    pub fn new() -> Self {
        Self
    }

    async fn exchange(
        protocol: &DnsProtocol,
        query_bytes: &[u8],
        expected_id: u16,
        timeout: Duration,
    ) -> Result<(DnsResponse, &'static str), DomainError> {
        let dns_transport = transport::create_transport(protocol).await?;
        let transport_response = dns_transport.send(query_bytes, timeout).await?;
        let response = ResponseParser::parse(&transport_response.bytes)?;

        // DoH servers may zero the ID (RFC 8484 §4.1); ODoH sends it zeroed.
        let id_ok = response.id() == expected_id
            || (matches!(
                protocol,
                DnsProtocol::Https { .. } | DnsProtocol::ObliviousHttps { .. }
            ) && response.id() == 0);
        if !id_ok {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response ID {} does not match query ID {}",
                response.id(),
                expected_id
            )));
        }

        Ok((response, transport_response.protocol_used))
    }
}

#[async_trait]
impl DnsQueryPort for UpstreamQueryClient {
    async fn query(
        &self,
        server: &DnsProtocol,
        name: &Label,
        record_type: RecordType,
        options: QueryOptions,
        timeout: Duration,
    ) -> Result<QueryAnswer, DomainError> {
        let start = Instant::now();
        let (id, query_bytes) =
            MessageBuilder::build_query_with_options(name.as_str(), &record_type, &options)?;

        let (mut response, mut protocol_used) =
            Self::exchange(server, &query_bytes, id, timeout).await?;

        if response.truncated {
            if let (DnsProtocol::Udp { endpoint }, Some(tcp_protocol)) = (server, server.as_stream())
            {
                debug!(
                    server = %endpoint,
                    "Response truncated (TC bit), retrying via TCP"
                );

                let remaining = timeout
                    .checked_sub(start.elapsed())
                    .unwrap_or(Duration::from_millis(500));

                (response, protocol_used) =
                    Self::exchange(&tcp_protocol, &query_bytes, id, remaining).await?;
            }
        }

        let elapsed = start.elapsed();
        debug!(
            name = %name,
            record_type = %record_type,
            server = %server,
            protocol = protocol_used,
            rcode = ResponseParser::rcode_to_status(response.rcode),
            answers = response.answers.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Query answered"
        );

        Ok(QueryAnswer {
            name: name.clone(),
            record_type,
            rcode: ResponseParser::rcode_to_status(response.rcode),
            raw_text: response.message.to_string(),
            answers: response.answers,
            authority: response.authority,
            additional: response.additional,
            truncated: response.truncated,
            protocol_used,
            server: Arc::from(server.to_string()),
            elapsed,
        })
    }
}
