use super::session;
use crate::dns::forwarding::MessageBuilder;
use crate::dns::transport::{self, tcp};
use async_trait::async_trait;
use dnsq_application::ports::{EnvelopeStream, ZoneTransferSource};
use dnsq_domain::{DnsProtocol, DomainError, Label};
use std::time::Duration;
use tracing::debug;

/// Opens AXFR sessions over TCP, or over TLS for `tls://` servers (XoT).
///
/// Plain and `udp://` server strings are upgraded to TCP; AXFR needs a
/// stream transport. DoH servers cannot carry a transfer.
pub struct AxfrClient {
    timeout: Duration,
}

impl AxfrClient {
    /// `timeout` bounds connecting, sending the request and every
    /// individual read of the response stream.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ZoneTransferSource for AxfrClient {
    async fn open_session(
        &self,
        zone: &Label,
        server: &str,
    ) -> Result<EnvelopeStream, DomainError> {
        let protocol = DnsProtocol::parse(server)?;
        let (id, query) = MessageBuilder::build_axfr(zone.as_str())?;

        debug!(zone = %zone, server = %protocol, id, "Opening AXFR session");

        match protocol.as_stream() {
            Some(DnsProtocol::Tcp { endpoint }) => {
                let addr = transport::resolve_endpoint(&endpoint).await?;
                let stream = tcp::connect(addr, self.timeout).await?;
                session::start(stream, id, zone, &addr.to_string(), &query, self.timeout).await
            }
            #[cfg(feature = "dns-over-rustls")]
            Some(DnsProtocol::Tls { endpoint, hostname }) => {
                let addr = transport::resolve_endpoint(&endpoint).await?;
                let stream = transport::tls::connect_tls(addr, &hostname, self.timeout).await?;
                session::start(stream, id, zone, &addr.to_string(), &query, self.timeout).await
            }
            _ => Err(DomainError::ZoneTransferUnsupported(
                protocol.protocol_name().to_string(),
            )),
        }
    }
}
