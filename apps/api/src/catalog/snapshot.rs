//! Optional durability for the catalog: a JSON snapshot rewritten after each mutation.
//!
//! Writes go to a temp file in the target directory and are renamed into place,
//! so a crash never leaves a half-written snapshot behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::catalog::store::Catalog;
use crate::models::entry::Entry;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to move snapshot into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Snapshot task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub next_seq: u32,
    pub entries: Vec<Entry>,
}

pub struct SnapshotStore {
    path: PathBuf,
    /// Revision of the last snapshot on disk. Older revisions are never written over newer ones.
    written: Mutex<Option<u64>>,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. `Ok(None)` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<Catalog>, SnapshotError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: CatalogSnapshot = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} entries from snapshot {}",
            snapshot.entries.len(),
            self.path.display()
        );
        Ok(Some(Catalog::from_parts(snapshot.entries, snapshot.next_seq)))
    }

    /// Writes `snapshot` unless a newer revision is already on disk.
    pub async fn persist(
        &self,
        snapshot: CatalogSnapshot,
        revision: u64,
    ) -> Result<(), SnapshotError> {
        let mut written = self.written.lock().await;
        if written.is_some_and(|w| w >= revision) {
            debug!("Snapshot revision {revision} already superseded");
            return Ok(());
        }

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &snapshot)).await??;

        *written = Some(revision);
        debug!("Wrote snapshot revision {revision} to {}", self.path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, snapshot: &CatalogSnapshot) -> Result<(), SnapshotError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, snapshot)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
