use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnsq_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP transport (RFC 1035 §4.2.2 framing)
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

/// Open a TCP connection, bounded by `timeout`.
pub async fn connect(server_addr: SocketAddr, timeout: Duration) -> Result<TcpStream, DomainError> {
    let stream = tokio::time::timeout(timeout, TcpStream::connect(server_addr))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })?
        .map_err(|e| DomainError::from_io(server_addr.to_string(), &e))?;

    stream.set_nodelay(true).ok();
    Ok(stream)
}

/// Write one message with its 2-byte big-endian length prefix.
pub async fn write_framed<W>(writer: &mut W, message: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let len = u16::try_from(message.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "DNS message exceeds 65535 bytes")
    })?;

    let mut framed = Vec::with_capacity(message.len() + 2);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    writer.write_all(&framed).await?;
    writer.flush().await
}

/// Read one length-prefixed message. `Ok(None)` means the peer closed the
/// stream cleanly between messages.
pub async fn read_framed<R>(reader: &mut R) -> io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let len = u16::from_be_bytes(len_buf) as usize;
    let mut message = vec![0u8; len];
    reader.read_exact(&mut message).await?;
    Ok(Some(message))
}

/// One request/response exchange over an established stream.
pub(crate) async fn exchange<S>(
    stream: &mut S,
    server: &str,
    message_bytes: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, DomainError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    tokio::time::timeout(timeout, write_framed(stream, message_bytes))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.to_string(),
        })?
        .map_err(|e| DomainError::from_io(server, &e))?;

    tokio::time::timeout(timeout, read_framed(stream))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.to_string(),
        })?
        .map_err(|e| DomainError::from_io(server, &e))?
        .ok_or_else(|| DomainError::TransportConnectionReset {
            server: server.to_string(),
        })
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = connect(self.server_addr, timeout).await?;
        let server = self.server_addr.to_string();

        let bytes = exchange(&mut stream, &server, message_bytes, timeout).await?;

        debug!(server = %self.server_addr, bytes_received = bytes.len(), "TCP response received");

        Ok(TransportResponse {
            bytes: Bytes::from(bytes),
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
