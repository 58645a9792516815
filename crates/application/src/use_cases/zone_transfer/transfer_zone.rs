use crate::ports::{TransferEnvelope, ZoneTransferSource};
use dnsq_domain::{DomainError, Label, ZoneRecord};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case: Transfer one zone from one server (AXFR)
///
/// Drains the whole session. Error envelopes are logged and skipped; only a
/// failure to open the session is returned as an error.
pub struct TransferZoneUseCase {
    source: Arc<dyn ZoneTransferSource>,
}

impl TransferZoneUseCase {
    pub fn new(source: Arc<dyn ZoneTransferSource>) -> Self {
        Self { source }
    }

    pub async fn execute(&self, zone: &Label, server: &str) -> Result<Vec<ZoneRecord>, DomainError> {
        let mut session = self.source.open_session(zone, server).await?;

        let mut records = Vec::new();
        let mut envelopes = 0usize;
        let mut section_errors = 0usize;

        while let Some(envelope) = session.next().await {
            envelopes += 1;
            match envelope {
                TransferEnvelope::Records(batch) => records.extend(batch),
                TransferEnvelope::Error(reason) => {
                    section_errors += 1;
                    warn!(zone = %zone, error = %reason, "AXFR section error");
                }
            }
        }

        debug!(
            zone = %zone,
            server = server,
            envelopes,
            section_errors,
            records = records.len(),
            "AXFR session finished"
        );

        Ok(records)
    }
}
