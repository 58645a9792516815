#[cfg(feature = "dns-over-https")]
pub mod https;
#[cfg(feature = "dns-over-odoh")]
pub mod odoh;
pub mod resolve;
pub mod tcp;
#[cfg(feature = "dns-over-rustls")]
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use bytes::Bytes;
use dnsq_domain::{DnsProtocol, DomainError};
use std::time::Duration;

pub use resolve::resolve_endpoint;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Bytes,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport, one variant per encapsulation.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
    #[cfg(feature = "dns-over-rustls")]
    Tls(tls::TlsTransport),
    #[cfg(feature = "dns-over-https")]
    Https(https::HttpsTransport),
    #[cfg(feature = "dns-over-odoh")]
    ObliviousHttps(odoh::ObliviousHttpsTransport),
}

impl Transport {
    /// Send a DNS query via the appropriate protocol (static dispatch).
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(t) => DnsTransport::send(t, message_bytes, timeout).await,
            #[cfg(feature = "dns-over-https")]
            Self::Https(t) => DnsTransport::send(t, message_bytes, timeout).await,
            #[cfg(feature = "dns-over-odoh")]
            Self::ObliviousHttps(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    /// Protocol name for logging.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(_) => "TLS",
            #[cfg(feature = "dns-over-https")]
            Self::Https(_) => "HTTPS",
            #[cfg(feature = "dns-over-odoh")]
            Self::ObliviousHttps(_) => "ODoH",
        }
    }
}

/// Create the transport for a server, resolving its hostname if needed.
pub async fn create_transport(protocol: &DnsProtocol) -> Result<Transport, DomainError> {
    match protocol {
        DnsProtocol::Udp { endpoint } => Ok(Transport::Udp(udp::UdpTransport::new(
            resolve_endpoint(endpoint).await?,
        ))),
        DnsProtocol::Tcp { endpoint } => Ok(Transport::Tcp(tcp::TcpTransport::new(
            resolve_endpoint(endpoint).await?,
        ))),
        #[cfg(feature = "dns-over-rustls")]
        DnsProtocol::Tls { endpoint, hostname } => Ok(Transport::Tls(tls::TlsTransport::new(
            resolve_endpoint(endpoint).await?,
            hostname.to_string(),
        ))),
        #[cfg(not(feature = "dns-over-rustls"))]
        DnsProtocol::Tls { endpoint, .. } => Err(DomainError::InvalidServer(format!(
            "DNS-over-TLS support not compiled in (upstream: {})",
            endpoint
        ))),
        #[cfg(feature = "dns-over-https")]
        DnsProtocol::Https { url, .. } => {
            Ok(Transport::Https(https::HttpsTransport::new(std::sync::Arc::clone(url))))
        }
        #[cfg(not(feature = "dns-over-https"))]
        DnsProtocol::Https { url, .. } => Err(DomainError::InvalidServer(format!(
            "DNS-over-HTTPS support not compiled in (upstream: {})",
            url
        ))),
        #[cfg(feature = "dns-over-odoh")]
        DnsProtocol::ObliviousHttps {
            target_host,
            target_path,
            proxy_url,
        } => Ok(Transport::ObliviousHttps(odoh::ObliviousHttpsTransport::new(
            std::sync::Arc::clone(target_host),
            std::sync::Arc::clone(target_path),
            std::sync::Arc::clone(proxy_url),
        ))),
        #[cfg(not(feature = "dns-over-odoh"))]
        DnsProtocol::ObliviousHttps { target_host, .. } => Err(DomainError::InvalidServer(
            format!("Oblivious DoH support not compiled in (target: {})", target_host),
        )),
    }
}
