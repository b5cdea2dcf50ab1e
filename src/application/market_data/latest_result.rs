use crate::application::market_data::signal_response::SignalResponse;
use crate::domain::types::ResultSnapshot;
use std::sync::{Arc, RwLock};

/// Single slot holding the most recently published [`ResultSnapshot`].
///
/// Snapshots are immutable and stored behind an `Arc`; publishing swaps the
/// pointer, so a reader either sees the previous snapshot or the new one, never
/// a mix. The lock is only held for the swap or the `Arc` clone.
pub struct LatestResultStore {
    latest: RwLock<Option<Arc<ResultSnapshot>>>,
}

impl std::fmt::Debug for LatestResultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatestResultStore")
            .field("latest", &"<RwLock>")
            .finish()
    }
}

impl LatestResultStore {
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(None),
        }
    }

    /// Replace the stored snapshot. Returns the shared handle now visible to readers.
    pub fn publish(&self, snapshot: ResultSnapshot) -> Arc<ResultSnapshot> {
        let snapshot = Arc::new(snapshot);

        match self.latest.write() {
            Ok(mut guard) => {
                *guard = Some(snapshot.clone());
            }
            Err(poisoned) => {
                tracing::error!("LatestResultStore: Lock poisoned during publish, recovering");
                *poisoned.into_inner() = Some(snapshot.clone());
            }
        }

        snapshot
    }

    /// Current snapshot, `None` before the first publish.
    pub fn read(&self) -> Option<Arc<ResultSnapshot>> {
        match self.latest.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Outbound view of the current state; all fields null before the first publish.
    pub fn response(&self) -> SignalResponse {
        SignalResponse::from(self.read().as_deref())
    }

    pub fn has_data(&self) -> bool {
        self.read().is_some()
    }
}

impl Default for LatestResultStore {
    fn default() -> Self {
        Self::new()
    }
}
