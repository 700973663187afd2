use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use crate::catalog::ingest::IngestGuard;
use crate::catalog::snapshot::SnapshotStore;
use crate::catalog::store::Catalog;
use crate::details::DetailsPanel;
use crate::enrichment::Enricher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
    /// Pluggable enricher. Default: GeminiEnricher.
    pub enricher: Arc<dyn Enricher>,
    pub details: Arc<Mutex<DetailsPanel>>,
    /// Set while a create is waiting on the enricher.
    pub ingest_in_flight: Arc<AtomicBool>,
    /// Present only when a snapshot path is configured.
    pub snapshots: Option<Arc<SnapshotStore>>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        enricher: Arc<dyn Enricher>,
        snapshots: Option<SnapshotStore>,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            enricher,
            details: Arc::new(Mutex::new(DetailsPanel::default())),
            ingest_in_flight: Arc::new(AtomicBool::new(false)),
            snapshots: snapshots.map(Arc::new),
        }
    }

    pub fn try_begin_ingest(&self) -> Option<IngestGuard> {
        IngestGuard::try_acquire(&self.ingest_in_flight)
    }

    /// Writes the current catalog to the snapshot, if one is configured.
    /// Failures are logged; the in-memory catalog stays authoritative.
    pub async fn persist_catalog(&self) {
        let Some(store) = &self.snapshots else {
            return;
        };

        let (snapshot, revision) = {
            let catalog = self.catalog.read().await;
            (catalog.snapshot(), catalog.revision())
        };

        if let Err(e) = store.persist(snapshot, revision).await {
            warn!(
                "Failed to write catalog snapshot to {}: {e}",
                store.path().display()
            );
        }
    }
}
