use super::tcp;
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnsq_domain::DomainError;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

/// Shared client config with the Mozilla root set, built once.
static TLS_CONFIG: LazyLock<Result<Arc<ClientConfig>, String>> = LazyLock::new(|| {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map(|builder| {
            Arc::new(
                builder
                    .with_root_certificates(roots)
                    .with_no_client_auth(),
            )
        })
        .map_err(|e| e.to_string())
});

/// DNS-over-TLS transport (RFC 7858)
pub struct TlsTransport {
    server_addr: SocketAddr,
    hostname: String,
}

impl TlsTransport {
    pub fn new(server_addr: SocketAddr, hostname: String) -> Self {
        Self {
            server_addr,
            hostname,
        }
    }
}

/// TCP connect plus TLS handshake with SNI `hostname`, bounded by `timeout`.
pub async fn connect_tls(
    server_addr: SocketAddr,
    hostname: &str,
    timeout: Duration,
) -> Result<TlsStream<TcpStream>, DomainError> {
    let config = TLS_CONFIG
        .as_ref()
        .map_err(|e| DomainError::TransportFailed {
            server: server_addr.to_string(),
            reason: format!("TLS configuration error: {e}"),
        })?;

    let server_name = ServerName::try_from(hostname.to_string()).map_err(|e| {
        DomainError::InvalidServer(format!("invalid TLS server name '{hostname}': {e}"))
    })?;

    let tcp_stream = tcp::connect(server_addr, timeout).await?;
    let connector = TlsConnector::from(Arc::clone(config));

    let stream = tokio::time::timeout(timeout, connector.connect(server_name, tcp_stream))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })?
        .map_err(|e| DomainError::TransportFailed {
            server: server_addr.to_string(),
            reason: format!("TLS handshake with {hostname} failed: {e}"),
        })?;

    debug!(server = %server_addr, hostname, "TLS session established");
    Ok(stream)
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = connect_tls(self.server_addr, &self.hostname, timeout).await?;
        let server = self.server_addr.to_string();

        let bytes = tcp::exchange(&mut stream, &server, message_bytes, timeout).await?;

        debug!(
            server = %self.server_addr,
            hostname = %self.hostname,
            bytes_received = bytes.len(),
            "TLS response received"
        );

        Ok(TransportResponse {
            bytes: Bytes::from(bytes),
            protocol_used: "TLS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}
