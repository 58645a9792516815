use async_trait::async_trait;
use dnsq_domain::{DomainError, Label, ZoneRecord};
use futures::stream::BoxStream;

/// One unit of a streamed zone transfer.
#[derive(Debug, Clone)]
pub enum TransferEnvelope {
    Records(Vec<ZoneRecord>),
    /// A section that could not be used; the session keeps going.
    Error(String),
}

pub type EnvelopeStream = BoxStream<'static, TransferEnvelope>;

/// Opens AXFR sessions.
///
/// `open_session` fails only when the session cannot be established
/// (unreachable server, zone refusing transfers). Problems inside an open
/// session arrive as [`TransferEnvelope::Error`] items.
#[async_trait]
pub trait ZoneTransferSource: Send + Sync {
    async fn open_session(&self, zone: &Label, server: &str)
        -> Result<EnvelopeStream, DomainError>;
}
