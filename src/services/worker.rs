use crate::services::metadata::MetadataStore;
use crate::services::storage::StorageService;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

/// Periodic cleanup sweeper. The only writer that removes records: it never
/// creates or mutates them.
pub struct CleanupWorker {
    store: Arc<MetadataStore>,
    storage: Arc<StorageService>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl CleanupWorker {
    pub fn new(
        store: Arc<MetadataStore>,
        storage: Arc<StorageService>,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            storage,
            interval,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            "🧹 Cleanup worker started (interval: {}s)",
            self.interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = self.shutdown.changed() => {
                    tracing::info!("🛑 Cleanup worker shutting down");
                    break;
                }
                _ = sleep(self.interval) => {
                    let removed = sweep(&self.store, &self.storage).await;
                    if removed > 0 {
                        tracing::info!("Cleanup sweep removed {} expired file(s)", removed);
                    }
                }
            }
        }
    }
}

/// One scan-and-delete pass over the metadata store. Works on a snapshot so
/// the store lock is never held across file I/O. Per-record failures are
/// logged and skipped; the sweep always finishes. Returns the number of
/// records removed.
pub async fn sweep(store: &MetadataStore, storage: &StorageService) -> usize {
    let now = Utc::now();
    let mut removed = 0;

    for record in store.list() {
        if !record.is_expired_at(now) {
            continue;
        }

        // Delete the backing file first; a file already gone (download race
        // or an earlier partial sweep) is fine.
        match storage.delete(&record.stored_path).await {
            Ok(_) => {}
            Err(e) => {
                tracing::error!(
                    "Failed to delete expired file {} ({}): {}",
                    record.id,
                    record.stored_path.display(),
                    e
                );
                continue;
            }
        }

        if store.remove(&record.id).is_some() {
            tracing::debug!("Expired record removed: {}", record.id);
            removed += 1;
        }
    }

    removed
}
