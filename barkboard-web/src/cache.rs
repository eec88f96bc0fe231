//! Catalog snapshot cache
//!
//! Holds the latest good batch per surface behind a read/write lock. A
//! snapshot is immutable once stored; refreshes swap in a whole new batch
//! or keep the old one when the fetch fails. Readers never wait on the
//! network.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use barkboard_common::events::{CatalogEvent, EventBus, Surface};
use barkboard_common::model::{DogRecord, ProposedChange, ShortPost};
use tokio::sync::{Mutex, RwLock};
use tokio::time::MissedTickBehavior;

use crate::upstream::{UpstreamClient, UpstreamError};

/// How often the background task re-checks staleness
const REFRESH_CHECK_INTERVAL: Duration = Duration::from_secs(300);

/// One cached surface: the latest good batch and when it was fetched
struct Slot<T> {
    inner: RwLock<Option<SlotState<T>>>,
    /// Single-flight guard; a second refresh attempt while one is in
    /// flight returns immediately instead of queueing
    refreshing: Mutex<()>,
}

struct SlotState<T> {
    batch: Arc<Vec<T>>,
    fetched_at: Instant,
}

impl<T> Slot<T> {
    fn empty() -> Self {
        Self {
            inner: RwLock::new(None),
            refreshing: Mutex::new(()),
        }
    }

    fn preloaded(batch: Vec<T>) -> Self {
        Self {
            inner: RwLock::new(Some(SlotState {
                batch: Arc::new(batch),
                fetched_at: Instant::now(),
            })),
            refreshing: Mutex::new(()),
        }
    }

    async fn snapshot(&self) -> Option<Arc<Vec<T>>> {
        self.inner.read().await.as_ref().map(|s| Arc::clone(&s.batch))
    }

    async fn is_fresh(&self, window: Duration) -> bool {
        match self.inner.read().await.as_ref() {
            Some(state) => state.fetched_at.elapsed() < window,
            None => false,
        }
    }

    async fn store(&self, batch: Vec<T>) {
        *self.inner.write().await = Some(SlotState {
            batch: Arc::new(batch),
            fetched_at: Instant::now(),
        });
    }
}

/// Cache over the three upstream surfaces
///
/// Explicitly constructed and injected; the test constructor `preloaded`
/// fills every slot without a network client, so router tests run against
/// fixed data.
pub struct CatalogCache {
    client: Option<UpstreamClient>,
    dogs: Slot<DogRecord>,
    shorts: Slot<ShortPost>,
    changes: Slot<ProposedChange>,
    /// Staleness window for the dog batch
    dogs_stale: Duration,
    /// Staleness window for the two review surfaces
    review_stale: Duration,
    bus: EventBus,
}

impl CatalogCache {
    pub fn new(
        client: UpstreamClient,
        dogs_stale: Duration,
        review_stale: Duration,
        bus: EventBus,
    ) -> Self {
        Self {
            client: Some(client),
            dogs: Slot::empty(),
            shorts: Slot::empty(),
            changes: Slot::empty(),
            dogs_stale,
            review_stale,
            bus,
        }
    }

    /// Cache with every slot already filled and no upstream client
    pub fn preloaded(
        dogs: Vec<DogRecord>,
        shorts: Vec<ShortPost>,
        changes: Vec<ProposedChange>,
        bus: EventBus,
    ) -> Self {
        Self {
            client: None,
            dogs: Slot::preloaded(dogs),
            shorts: Slot::preloaded(shorts),
            changes: Slot::preloaded(changes),
            dogs_stale: Duration::from_secs(u64::MAX / 4),
            review_stale: Duration::from_secs(u64::MAX / 4),
            bus,
        }
    }

    /// Latest dog batch; `None` until the first successful fetch
    pub async fn dogs(&self) -> Option<Arc<Vec<DogRecord>>> {
        self.dogs.snapshot().await
    }

    /// Latest short-post batch
    pub async fn shorts(&self) -> Option<Arc<Vec<ShortPost>>> {
        self.shorts.snapshot().await
    }

    /// Latest proposed-change batch
    pub async fn changes(&self) -> Option<Arc<Vec<ProposedChange>>> {
        self.changes.snapshot().await
    }

    pub async fn refresh_dogs_if_stale(&self) {
        if self.dogs.is_fresh(self.dogs_stale).await {
            return;
        }
        let Some(client) = &self.client else { return };
        refresh_slot(&self.dogs, Surface::Dogs, &self.bus, || client.fetch_dogs()).await;
    }

    pub async fn refresh_shorts_if_stale(&self) {
        if self.shorts.is_fresh(self.review_stale).await {
            return;
        }
        let Some(client) = &self.client else { return };
        refresh_slot(&self.shorts, Surface::Shorts, &self.bus, || client.fetch_shorts()).await;
    }

    pub async fn refresh_changes_if_stale(&self) {
        if self.changes.is_fresh(self.review_stale).await {
            return;
        }
        let Some(client) = &self.client else { return };
        refresh_slot(&self.changes, Surface::Changes, &self.bus, || client.fetch_changes()).await;
    }

    /// Spawn the background loop that keeps all three surfaces fresh.
    ///
    /// The first interval tick fires immediately, so this also performs
    /// the initial fetch at startup.
    pub fn spawn_refresh_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(REFRESH_CHECK_INTERVAL);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                cache.refresh_dogs_if_stale().await;
                cache.refresh_shorts_if_stale().await;
                cache.refresh_changes_if_stale().await;
            }
        })
    }
}

/// Fetch one surface and swap the slot on success.
///
/// On failure the previous snapshot stays in service and the failure is
/// announced on the bus.
async fn refresh_slot<T, F, Fut>(slot: &Slot<T>, surface: Surface, bus: &EventBus, fetch: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, UpstreamError>>,
{
    let _guard = match slot.refreshing.try_lock() {
        Ok(guard) => guard,
        // Another refresh is already in flight
        Err(_) => return,
    };

    match fetch().await {
        Ok(batch) => {
            let records = batch.len();
            slot.store(batch).await;
            tracing::info!(?surface, records, "Refreshed catalog surface");
            bus.emit(CatalogEvent::CatalogRefreshed {
                surface,
                records,
                timestamp: chrono::Utc::now(),
            });
        }
        Err(err) => {
            tracing::warn!(?surface, error = %err, "Refresh failed, keeping previous snapshot");
            bus.emit(CatalogEvent::RefreshFailed {
                surface,
                error: err.to_string(),
                timestamp: chrono::Utc::now(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str, name: &str) -> DogRecord {
        DogRecord {
            id: id.to_string(),
            name: name.to_string(),
            ..DogRecord::default()
        }
    }

    #[tokio::test]
    async fn empty_slot_has_no_snapshot() {
        let slot: Slot<DogRecord> = Slot::empty();
        assert!(slot.snapshot().await.is_none());
        assert!(!slot.is_fresh(Duration::from_secs(3600)).await);
    }

    #[tokio::test]
    async fn stored_batch_is_served_and_fresh() {
        let slot = Slot::empty();
        slot.store(vec![dog("1", "Bella")]).await;

        let snap = slot.snapshot().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert!(slot.is_fresh(Duration::from_secs(3600)).await);
        assert!(!slot.is_fresh(Duration::from_secs(0)).await);
    }

    #[tokio::test]
    async fn preloaded_cache_serves_all_surfaces() {
        let bus = EventBus::new(16);
        let cache = CatalogCache::preloaded(
            vec![dog("1", "Bella"), dog("2", "Zeus")],
            vec![],
            vec![],
            bus,
        );

        assert_eq!(cache.dogs().await.unwrap().len(), 2);
        assert_eq!(cache.shorts().await.unwrap().len(), 0);
        assert_eq!(cache.changes().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn preloaded_cache_never_refetches() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let cache = CatalogCache::preloaded(vec![dog("1", "Bella")], vec![], vec![], bus);

        // No client, so these must be no-ops that emit nothing
        cache.refresh_dogs_if_stale().await;
        cache.refresh_shorts_if_stale().await;
        cache.refresh_changes_if_stale().await;

        assert!(rx.try_recv().is_err());
        assert_eq!(cache.dogs().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn snapshots_are_shared_not_cloned() {
        let bus = EventBus::new(16);
        let cache = CatalogCache::preloaded(vec![dog("1", "Bella")], vec![], vec![], bus);

        let a = cache.dogs().await.unwrap();
        let b = cache.dogs().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
