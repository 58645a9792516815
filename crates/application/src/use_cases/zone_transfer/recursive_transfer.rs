use super::TransferZoneUseCase;
use crate::ports::ZoneStore;
use dnsq_domain::{DomainError, Label, TransferFailurePolicy, ZoneRecord};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A zone whose session could not be opened under
/// [`TransferFailurePolicy::SkipSubtree`].
#[derive(Debug, Clone)]
pub struct FailedZone {
    pub zone: Label,
    pub reason: String,
}

#[derive(Debug)]
pub struct RecursiveTransferReport {
    pub run_dir: PathBuf,
    /// Every record of every transferred zone, in discovery order.
    pub records: Vec<ZoneRecord>,
    /// Zones in the order they were entered.
    pub visited: Vec<Label>,
    pub zone_files: Vec<PathBuf>,
    pub failed: Vec<FailedZone>,
}

/// State of one run. Created per `execute` call, never shared between runs.
struct TraversalContext {
    run_dir: PathBuf,
    visited: HashSet<Label>,
    visit_order: Vec<Label>,
    records: Vec<ZoneRecord>,
    zone_files: Vec<PathBuf>,
    failed: Vec<FailedZone>,
}

impl TraversalContext {
    fn new(run_dir: PathBuf) -> Self {
        Self {
            run_dir,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            records: Vec::new(),
            zone_files: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Check-and-set on the visited set. Returns false if already seen.
    fn mark_visited(&mut self, zone: &Label) -> bool {
        if !self.visited.insert(zone.clone()) {
            return false;
        }
        self.visit_order.push(zone.clone());
        true
    }

    fn into_report(self) -> RecursiveTransferReport {
        RecursiveTransferReport {
            run_dir: self.run_dir,
            records: self.records,
            visited: self.visit_order,
            zone_files: self.zone_files,
            failed: self.failed,
        }
    }
}

/// Records of a transferred zone still to be scanned for delegations.
struct Frame {
    records: Vec<ZoneRecord>,
    cursor: usize,
}

/// Use case: Recursive AXFR over a delegation tree
///
/// Transfers `root`, writes it to the run directory, then follows every NS
/// record into the zone it delegates (the NS owner name), depth first, in
/// the order the NS records were received. Each zone is transferred at most
/// once per run, which is also what stops delegation loops.
///
/// The walk uses an explicit stack of frames instead of recursion. Records
/// land in the aggregate exactly where a recursive walk would put them: a
/// child's whole subtree directly follows the NS record that introduced it.
pub struct RecursiveTransferUseCase {
    transfer: TransferZoneUseCase,
    store: Arc<dyn ZoneStore>,
    policy: TransferFailurePolicy,
}

impl RecursiveTransferUseCase {
    pub fn new(
        transfer: TransferZoneUseCase,
        store: Arc<dyn ZoneStore>,
        policy: TransferFailurePolicy,
    ) -> Self {
        Self {
            transfer,
            store,
            policy,
        }
    }

    pub async fn execute(
        &self,
        root: &Label,
        server: &str,
    ) -> Result<RecursiveTransferReport, DomainError> {
        info!(zone = %root, server = server, "Attempting recursive AXFR");

        let run_dir = self.store.prepare_run(root).await?;
        let mut ctx = TraversalContext::new(run_dir);
        let mut stack: Vec<Frame> = Vec::new();

        if let Some(frame) = self.enter(&mut ctx, root, server).await? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(record) = frame.records.get(frame.cursor).cloned() else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let child = record.delegated_zone().cloned();
            ctx.records.push(record);

            if let Some(child) = child {
                if let Some(frame) = self.enter(&mut ctx, &child, server).await? {
                    stack.push(frame);
                }
            }
        }

        info!(
            records = ctx.records.len(),
            zones = ctx.visit_order.len(),
            files = ctx.zone_files.len(),
            failed = ctx.failed.len(),
            dir = %ctx.run_dir.display(),
            "AXFR complete"
        );

        Ok(ctx.into_report())
    }

    /// Transfers and persists `zone` unless it was already visited.
    async fn enter(
        &self,
        ctx: &mut TraversalContext,
        zone: &Label,
        server: &str,
    ) -> Result<Option<Frame>, DomainError> {
        if !ctx.mark_visited(zone) {
            debug!(zone = %zone, "Zone already transferred, skipping");
            return Ok(None);
        }

        info!(zone = %zone, "AXFR {}", zone);

        let records = match self.transfer.execute(zone, server).await {
            Ok(records) => records,
            Err(e) => match self.policy {
                TransferFailurePolicy::Abort => return Err(e),
                TransferFailurePolicy::SkipSubtree => {
                    warn!(zone = %zone, error = %e, "Zone transfer failed, skipping subtree");
                    ctx.failed.push(FailedZone {
                        zone: zone.clone(),
                        reason: e.to_string(),
                    });
                    return Ok(None);
                }
            },
        };

        if let Some(path) = self.store.persist(&ctx.run_dir, zone, &records).await? {
            debug!(zone = %zone, path = %path.display(), records = records.len(), "Zone file written");
            ctx.zone_files.push(path);
        }

        Ok(Some(Frame { records, cursor: 0 }))
    }
}
