use async_trait::async_trait;
use ferrous_sweep_application::ports::CheckpointStore;
use ferrous_sweep_domain::{CheckpointData, DomainError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes checkpoints as pretty JSON to `PREFIX.json`.
///
/// Each save goes to `PREFIX.json.tmp` first and is renamed over the
/// target, so the file on disk is always a complete snapshot.
pub struct JsonCheckpointStore {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl JsonCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tmp: OsString = path.clone().into_os_string();
        tmp.push(".tmp");
        Self {
            path,
            tmp_path: PathBuf::from(tmp),
        }
    }

    /// Store for `prefix.json`.
    pub fn for_prefix(prefix: &Path) -> Self {
        let mut path: OsString = prefix.as_os_str().to_owned();
        path.push(".json");
        Self::new(PathBuf::from(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, e: impl std::fmt::Display) -> DomainError {
        DomainError::CheckpointWrite {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl CheckpointStore for JsonCheckpointStore {
    async fn save(&self, data: &CheckpointData) -> Result<(), DomainError> {
        let mut buf = serde_json::to_vec_pretty(data)
            .map_err(|e| DomainError::CheckpointSerialization(e.to_string()))?;
        buf.push(b'\n');

        tokio::fs::write(&self.tmp_path, &buf)
            .await
            .map_err(|e| self.write_error(e))?;
        tokio::fs::rename(&self.tmp_path, &self.path)
            .await
            .map_err(|e| self.write_error(e))?;

        debug!(
            path = %self.path.display(),
            bytes = buf.len(),
            results = data.results.len(),
            "Checkpoint written"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
