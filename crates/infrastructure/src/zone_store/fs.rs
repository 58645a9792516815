use async_trait::async_trait;
use chrono::Local;
use dnsq_application::ports::ZoneStore;
use dnsq_domain::zone_artifacts::{render_zone, run_directory_name, zone_file_name};
use dnsq_domain::{DomainError, Label, ZoneRecord};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each transferred zone as a text file under a per-run directory
/// rooted at `output_root`.
pub struct FsZoneStore {
    output_root: PathBuf,
}

impl FsZoneStore {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }
}

#[async_trait]
impl ZoneStore for FsZoneStore {
    async fn prepare_run(&self, root: &Label) -> Result<PathBuf, DomainError> {
        let dir = self
            .output_root
            .join(run_directory_name(root, &Local::now()));

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            DomainError::IoError(format!(
                "creating recaxfr directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        debug!(dir = %dir.display(), "Run directory created");
        Ok(dir)
    }

    async fn persist(
        &self,
        run_dir: &Path,
        zone: &Label,
        records: &[ZoneRecord],
    ) -> Result<Option<PathBuf>, DomainError> {
        let Some(body) = render_zone(records) else {
            return Ok(None);
        };

        let path = run_dir.join(zone_file_name(zone));
        tokio::fs::write(&path, body).await.map_err(|e| {
            DomainError::IoError(format!("writing zone file {}: {}", path.display(), e))
        })?;

        Ok(Some(path))
    }
}
