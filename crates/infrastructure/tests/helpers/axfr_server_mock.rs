#![allow(dead_code)]
use super::wire::{self, WireRecord, RCODE_NOERROR, RCODE_REFUSED};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// One message sent back on an AXFR connection.
#[derive(Debug, Clone)]
pub enum Reply {
    Records(Vec<WireRecord>),
    Rcode(u8),
    /// Bytes that do not decode as a DNS message.
    Garbage,
    /// Valid records under a message ID the client never used.
    WrongId(Vec<WireRecord>),
    /// Empty answer with `rcode` under a message ID the client never used.
    StrayRcode(u8),
}

#[derive(Debug, Clone, Default)]
struct ZoneScript {
    replies: Vec<Reply>,
    hold_open: bool,
}

/// Loopback AXFR server speaking RFC 1035 TCP framing.
///
/// Each zone gets a scripted list of replies. Zones without a script are
/// answered with REFUSED. The connection is closed after the last reply
/// unless the zone was registered with `hold_open`.
pub struct MockAxfrServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

pub struct MockAxfrServerBuilder {
    zones: HashMap<String, ZoneScript>,
}

impl MockAxfrServer {
    pub fn builder() -> MockAxfrServerBuilder {
        MockAxfrServerBuilder {
            zones: HashMap::new(),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Server string accepted by the client (`127.0.0.1:port`).
    pub fn server(&self) -> String {
        self.addr.to_string()
    }

    /// Question names received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    async fn serve(
        mut stream: TcpStream,
        zones: Arc<HashMap<String, ZoneScript>>,
        requests: Arc<Mutex<Vec<String>>>,
    ) -> std::io::Result<()> {
        let mut len_buf = [0u8; 2];
        stream.read_exact(&mut len_buf).await?;
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        stream.read_exact(&mut query).await?;

        let Some((id, zone)) = wire::parse_query(&query) else {
            return Ok(());
        };
        requests.lock().unwrap().push(zone.clone());

        let script = zones.get(&zone).cloned().unwrap_or(ZoneScript {
            replies: vec![Reply::Rcode(RCODE_REFUSED)],
            hold_open: false,
        });

        for reply in &script.replies {
            let message = match reply {
                Reply::Records(records) => wire::response(id, RCODE_NOERROR, false, records),
                Reply::Rcode(rcode) => wire::response(id, *rcode, false, &[]),
                Reply::Garbage => vec![0xde, 0xad, 0xbe, 0xef, 0x00],
                Reply::WrongId(records) => {
                    wire::response(id.wrapping_add(1), RCODE_NOERROR, false, records)
                }
                Reply::StrayRcode(rcode) => wire::response(id.wrapping_add(1), *rcode, false, &[]),
            };
            stream
                .write_all(&(message.len() as u16).to_be_bytes())
                .await?;
            stream.write_all(&message).await?;
        }
        stream.flush().await?;

        if script.hold_open {
            // Keep the socket alive until the client gives up.
            let mut sink = [0u8; 1];
            let _ = stream.read(&mut sink).await;
        }
        Ok(())
    }
}

impl MockAxfrServerBuilder {
    /// Whole zone in a single message.
    pub fn zone(self, name: &str, records: Vec<WireRecord>) -> Self {
        self.script(name, vec![Reply::Records(records)], false)
    }

    pub fn script(mut self, name: &str, replies: Vec<Reply>, hold_open: bool) -> Self {
        self.zones
            .insert(name.to_string(), ZoneScript { replies, hold_open });
        self
    }

    pub async fn start(self) -> std::io::Result<MockAxfrServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let zones = Arc::new(self.zones);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let server_requests = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let zones = Arc::clone(&zones);
                            let requests = Arc::clone(&server_requests);
                            tokio::spawn(async move {
                                let _ = MockAxfrServer::serve(stream, zones, requests).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(MockAxfrServer {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl Drop for MockAxfrServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
