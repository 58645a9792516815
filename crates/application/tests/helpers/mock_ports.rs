#![allow(dead_code)]

use async_trait::async_trait;
use dnsq_application::ports::{
    DnsQueryPort, EnvelopeStream, QueryAnswer, TransferEnvelope, ZoneStore, ZoneTransferSource,
};
use dnsq_domain::{DnsProtocol, DomainError, Label, QueryOptions, RecordType, ZoneRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Record builders
// ============================================================================

pub fn rr(owner: &str, record_type: RecordType, data: &str) -> ZoneRecord {
    let owner = Label::fqdn(owner);
    let text = format!("{owner}\t3600\tIN\t{record_type}\t{data}");
    ZoneRecord::new(owner, record_type, 3600, data, text)
}

pub fn ns(owner: &str, host: &str) -> ZoneRecord {
    rr(owner, RecordType::NS, host)
}

pub fn a(owner: &str, ip: &str) -> ZoneRecord {
    rr(owner, RecordType::A, ip)
}

pub fn soa(owner: &str) -> ZoneRecord {
    rr(
        owner,
        RecordType::SOA,
        "ns1.example.com. hostmaster.example.com. 1 7200 3600 1209600 3600",
    )
}

// ============================================================================
// Mock ZoneTransferSource
// ============================================================================

#[derive(Clone)]
enum ZoneBehaviour {
    Envelopes(Vec<TransferEnvelope>),
    Refuse(String),
}

#[derive(Clone, Default)]
pub struct MockZoneTransferSource {
    zones: Arc<RwLock<HashMap<String, ZoneBehaviour>>>,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockZoneTransferSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the zone as a single envelope.
    pub async fn set_zone(&self, zone: &str, records: Vec<ZoneRecord>) {
        self.set_envelopes(zone, vec![TransferEnvelope::Records(records)])
            .await;
    }

    pub async fn set_envelopes(&self, zone: &str, envelopes: Vec<TransferEnvelope>) {
        self.zones
            .write()
            .await
            .insert(Label::fqdn(zone).to_string(), ZoneBehaviour::Envelopes(envelopes));
    }

    pub async fn refuse(&self, zone: &str, reason: &str) {
        self.zones.write().await.insert(
            Label::fqdn(zone).to_string(),
            ZoneBehaviour::Refuse(reason.to_string()),
        );
    }

    /// Zones requested so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .map(|(zone, _)| zone.clone())
            .collect()
    }

    pub async fn call_count(&self, zone: &str) -> usize {
        let zone = Label::fqdn(zone).to_string();
        self.calls
            .read()
            .await
            .iter()
            .filter(|(z, _)| *z == zone)
            .count()
    }

    pub async fn servers(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .map(|(_, server)| server.clone())
            .collect()
    }
}

#[async_trait]
impl ZoneTransferSource for MockZoneTransferSource {
    async fn open_session(
        &self,
        zone: &Label,
        server: &str,
    ) -> Result<EnvelopeStream, DomainError> {
        self.calls
            .write()
            .await
            .push((zone.to_string(), server.to_string()));

        // Unknown zones transfer as empty, like a server that sends only
        // the two SOA markers stripped away.
        let behaviour = self
            .zones
            .read()
            .await
            .get(zone.as_str())
            .cloned()
            .unwrap_or(ZoneBehaviour::Envelopes(Vec::new()));

        match behaviour {
            ZoneBehaviour::Envelopes(envelopes) => Ok(Box::pin(futures::stream::iter(envelopes))),
            ZoneBehaviour::Refuse(reason) => Err(DomainError::ZoneTransferRefused {
                zone: zone.to_string(),
                server: server.to_string(),
                reason,
            }),
        }
    }
}

// ============================================================================
// Mock ZoneStore
// ============================================================================

#[derive(Clone, Default)]
pub struct MockZoneStore {
    prepared: Arc<RwLock<Vec<String>>>,
    files: Arc<RwLock<Vec<(String, Vec<String>)>>>,
    persist_calls: Arc<RwLock<Vec<String>>>,
    fail_on: Arc<RwLock<Option<String>>>,
}

impl MockZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `persist` fail for this zone.
    pub async fn fail_on(&self, zone: &str) {
        *self.fail_on.write().await = Some(Label::fqdn(zone).to_string());
    }

    pub async fn prepared(&self) -> Vec<String> {
        self.prepared.read().await.clone()
    }

    /// (zone, lines) for every file that would have been written.
    pub async fn files(&self) -> Vec<(String, Vec<String>)> {
        self.files.read().await.clone()
    }

    pub async fn persist_calls(&self) -> Vec<String> {
        self.persist_calls.read().await.clone()
    }
}

#[async_trait]
impl ZoneStore for MockZoneStore {
    async fn prepare_run(&self, root: &Label) -> Result<PathBuf, DomainError> {
        self.prepared.write().await.push(root.to_string());
        Ok(PathBuf::from(format!("{}_recaxfr", root.without_leading_dot())))
    }

    async fn persist(
        &self,
        run_dir: &Path,
        zone: &Label,
        records: &[ZoneRecord],
    ) -> Result<Option<PathBuf>, DomainError> {
        self.persist_calls.write().await.push(zone.to_string());

        if self.fail_on.read().await.as_deref() == Some(zone.as_str()) {
            return Err(DomainError::IoError(format!("disk full writing {zone}")));
        }
        if records.is_empty() {
            return Ok(None);
        }

        let lines = records.iter().map(|r| r.text.to_string()).collect();
        self.files.write().await.push((zone.to_string(), lines));
        Ok(Some(
            run_dir.join(format!("{}.zone", zone.without_trailing_dot())),
        ))
    }
}

// ============================================================================
// Mock DnsQueryPort
// ============================================================================

#[derive(Clone, Default)]
pub struct MockDnsQueryPort {
    answers: Arc<RwLock<HashMap<(String, RecordType), Vec<ZoneRecord>>>>,
    queried: Arc<RwLock<Vec<RecordType>>>,
    options_seen: Arc<RwLock<Vec<QueryOptions>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockDnsQueryPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_answer(&self, name: &str, record_type: RecordType, records: Vec<ZoneRecord>) {
        self.answers
            .write()
            .await
            .insert((Label::fqdn(name).to_string(), record_type), records);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn queried(&self) -> Vec<RecordType> {
        self.queried.read().await.clone()
    }

    pub async fn options_seen(&self) -> Vec<QueryOptions> {
        self.options_seen.read().await.clone()
    }
}

#[async_trait]
impl DnsQueryPort for MockDnsQueryPort {
    async fn query(
        &self,
        server: &DnsProtocol,
        name: &Label,
        record_type: RecordType,
        options: QueryOptions,
        _timeout: Duration,
    ) -> Result<QueryAnswer, DomainError> {
        self.queried.write().await.push(record_type);
        self.options_seen.write().await.push(options);

        if *self.should_fail.read().await {
            return Err(DomainError::TransportConnectionRefused {
                server: server.to_string(),
            });
        }

        let answers = self
            .answers
            .read()
            .await
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_default();

        Ok(QueryAnswer {
            name: name.clone(),
            record_type,
            rcode: if answers.is_empty() { "NXDOMAIN" } else { "NOERROR" },
            answers,
            authority: Vec::new(),
            additional: Vec::new(),
            truncated: false,
            protocol_used: server.protocol_name(),
            server: Arc::from(server.to_string()),
            elapsed: Duration::from_millis(1),
            raw_text: String::new(),
        })
    }
}
