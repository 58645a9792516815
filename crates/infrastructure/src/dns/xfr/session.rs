use crate::dns::forwarding::ResponseParser;
use crate::dns::transport::tcp::{read_framed, write_framed};
use dnsq_application::ports::{EnvelopeStream, TransferEnvelope};
use dnsq_domain::{DomainError, Label};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RecordType as HickoryRecordType;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::trace;

/// Sends the AXFR request and waits for the first response message.
///
/// Everything up to and including the first message belongs to session
/// establishment: a connection problem, an empty reply or an error rcode
/// on a message carrying our ID (REFUSED, NOTAUTH, ...) fails the whole
/// session. Later messages are
/// handed out one envelope each.
pub(super) async fn start<S>(
    mut io: S,
    id: u16,
    zone: &Label,
    server: &str,
    query: &[u8],
    timeout: Duration,
) -> Result<EnvelopeStream, DomainError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    tokio::time::timeout(timeout, write_framed(&mut io, query))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.to_string(),
        })?
        .map_err(|e| DomainError::from_io(server, &e))?;

    let first = tokio::time::timeout(timeout, read_framed(&mut io))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.to_string(),
        })?
        .map_err(|e| DomainError::from_io(server, &e))?
        .ok_or_else(|| DomainError::ZoneTransferRefused {
            zone: zone.to_string(),
            server: server.to_string(),
            reason: "connection closed before any response".to_string(),
        })?;

    // Only an answer to this request can refuse it. An undecodable or
    // foreign first message is left to the stream as an error envelope.
    if let Ok(message) = Message::from_vec(&first) {
        let rcode = message.response_code();
        if message.id() == id && rcode != ResponseCode::NoError {
            return Err(DomainError::ZoneTransferRefused {
                zone: zone.to_string(),
                server: server.to_string(),
                reason: ResponseParser::rcode_to_status(rcode).to_string(),
            });
        }
    }

    let state = SessionState {
        io,
        id,
        timeout,
        pending: Some(first),
        records_seen: 0,
        soa_seen: 0,
        opened_with_soa: false,
        finished: false,
    };

    Ok(Box::pin(futures::stream::unfold(state, SessionState::next_envelope)))
}

struct SessionState<S> {
    io: S,
    id: u16,
    timeout: Duration,
    /// First message, read during establishment but not yet handed out.
    pending: Option<Vec<u8>>,
    records_seen: usize,
    soa_seen: usize,
    opened_with_soa: bool,
    finished: bool,
}

impl<S> SessionState<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    async fn next_envelope(mut self) -> Option<(TransferEnvelope, Self)> {
        if self.finished {
            return None;
        }

        let frame = match self.pending.take() {
            Some(frame) => frame,
            None => match tokio::time::timeout(self.timeout, read_framed(&mut self.io)).await {
                Ok(Ok(Some(frame))) => frame,
                Ok(Ok(None)) => return None,
                Ok(Err(e)) => {
                    self.finished = true;
                    return Some((TransferEnvelope::Error(format!("read failed: {e}")), self));
                }
                Err(_) => {
                    self.finished = true;
                    let reason = format!("no message within {:?}", self.timeout);
                    return Some((TransferEnvelope::Error(reason), self));
                }
            },
        };

        let envelope = self.decode(&frame);
        Some((envelope, self))
    }

    fn decode(&mut self, frame: &[u8]) -> TransferEnvelope {
        let message = match Message::from_vec(frame) {
            Ok(message) => message,
            Err(e) => return TransferEnvelope::Error(format!("malformed section: {e}")),
        };

        if message.id() != self.id {
            return TransferEnvelope::Error(format!(
                "unexpected message ID {} (expected {})",
                message.id(),
                self.id
            ));
        }

        let rcode = message.response_code();
        if rcode != ResponseCode::NoError {
            return TransferEnvelope::Error(format!(
                "section carries rcode {}",
                ResponseParser::rcode_to_status(rcode)
            ));
        }

        let mut records = Vec::with_capacity(message.answers().len());
        for record in message.answers() {
            let is_soa = record.record_type() == HickoryRecordType::SOA;
            if self.records_seen == 0 {
                self.opened_with_soa = is_soa;
            }
            if is_soa {
                self.soa_seen += 1;
            }
            self.records_seen += 1;
            records.push(ResponseParser::to_zone_record(record));
        }

        // The transfer is bracketed by the zone's SOA; the second one closes it.
        if self.opened_with_soa && self.soa_seen >= 2 {
            self.finished = true;
        }

        trace!(
            records = records.len(),
            total = self.records_seen,
            finished = self.finished,
            "AXFR message decoded"
        );

        TransferEnvelope::Records(records)
    }
}
