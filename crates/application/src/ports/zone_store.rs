use async_trait::async_trait;
use dnsq_domain::{DomainError, Label, ZoneRecord};
use std::path::{Path, PathBuf};

/// Durable output of a recursive transfer.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Creates the run directory for `root` and returns its path.
    async fn prepare_run(&self, root: &Label) -> Result<PathBuf, DomainError>;

    /// Writes one zone file. Nothing is written for an empty record set,
    /// in which case `Ok(None)` is returned.
    async fn persist(
        &self,
        run_dir: &Path,
        zone: &Label,
        records: &[ZoneRecord],
    ) -> Result<Option<PathBuf>, DomainError>;
}
