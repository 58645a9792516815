#![allow(dead_code)]
use super::wire::{self, WireRecord, RCODE_NOERROR};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// Loopback DNS server answering every query with one A record.
///
/// UDP and TCP listen on the same port. With `truncate_udp` set, UDP
/// answers carry the TC bit and no records, so a client has to retry over
/// TCP to see the address.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

pub const MOCK_ANSWER: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 10);

impl MockDnsServer {
    pub async fn start(truncate_udp: bool) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let socket = UdpSocket::bind(addr).await?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let queries = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    received = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = received {
                            seen.lock().unwrap().push(buf[..len].to_vec());
                            if let Some(response) = Self::answer(&buf[..len], truncate_udp) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            let seen = Arc::clone(&seen);
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                seen.lock().unwrap().push(query.clone());
                                if let Some(response) = Self::answer(&query, false) {
                                    let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                                    let _ = stream.write_all(&response).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Raw query messages received so far, UDP and TCP alike.
    pub fn queries(&self) -> Vec<Vec<u8>> {
        self.queries.lock().unwrap().clone()
    }

    fn answer(query: &[u8], truncated: bool) -> Option<Vec<u8>> {
        let (id, name) = wire::parse_query(query)?;
        let records = if truncated {
            Vec::new()
        } else {
            vec![WireRecord::a(&name, MOCK_ANSWER)]
        };
        Some(wire::response(id, RCODE_NOERROR, truncated, &records))
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
