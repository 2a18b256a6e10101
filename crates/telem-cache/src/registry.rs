//! Top-level channel cache registry.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use telem_core::{CacheError, CacheResult, ChannelKey, ChannelRetriever};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::unary::{KeepAll, RetentionPolicy, UnaryCache};

/// Settings for the cache registry.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Samples held by each live rolling buffer.
    pub dynamic_buffer_capacity: usize,
    /// Period of the background GC sweep.
    pub gc_interval: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dynamic_buffer_capacity: 10_000,
            gc_interval: Duration::from_secs(30),
        }
    }
}

type Registry = Arc<Mutex<HashMap<ChannelKey, Arc<Mutex<UnaryCache>>>>>;

/// Top-level registry multiplexing per-channel caches for one session.
///
/// Lookup is a deliberate two-phase contract: [`Cache::populate_missing`]
/// is the only operation that awaits, so render loops can rely on
/// [`Cache::get`] never blocking.
pub struct Cache {
    registry: Registry,
    retriever: Arc<dyn ChannelRetriever>,
    settings: CacheSettings,
    policy: Arc<dyn RetentionPolicy>,
    gc_task: Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    /// Create a registry and start its background GC sweep.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(retriever: Arc<dyn ChannelRetriever>, settings: CacheSettings) -> CacheResult<Self> {
        Self::with_policy(retriever, settings, Arc::new(KeepAll))
    }

    /// Create a registry whose channel caches use a custom retention
    /// policy.
    pub fn with_policy(
        retriever: Arc<dyn ChannelRetriever>,
        settings: CacheSettings,
        policy: Arc<dyn RetentionPolicy>,
    ) -> CacheResult<Self> {
        if settings.dynamic_buffer_capacity == 0 {
            return Err(CacheError::Config(
                "dynamic buffer capacity must be greater than zero".into(),
            ));
        }
        let registry: Registry = Arc::new(Mutex::new(HashMap::new()));
        let gc_task = Self::spawn_gc(Arc::clone(&registry), settings.gc_interval);
        Ok(Self {
            registry,
            retriever,
            settings,
            policy,
            gc_task: Mutex::new(Some(gc_task)),
        })
    }

    fn spawn_gc(registry: Registry, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let units: Vec<_> = {
                    let registry = registry.lock().unwrap();
                    registry.values().cloned().collect()
                };
                for unit in units {
                    unit.lock().unwrap().garbage_collect();
                }
            }
        })
    }

    /// Ensure a channel cache exists for every key in `keys`.
    ///
    /// Keys already present are skipped; the missing subset is resolved in
    /// one batched metadata retrieval. On retrieval failure no entries are
    /// created. Concurrent overlapping calls may both fetch metadata, but
    /// insertion is check-then-insert under the registry lock, so exactly
    /// one cache instance per channel survives.
    pub async fn populate_missing(&self, keys: &[ChannelKey]) -> CacheResult<()> {
        let missing: Vec<ChannelKey> = {
            let registry = self.registry.lock().unwrap();
            let mut missing: Vec<ChannelKey> = keys
                .iter()
                .copied()
                .filter(|k| !registry.contains_key(k))
                .collect();
            missing.sort_unstable();
            missing.dedup();
            missing
        };
        if missing.is_empty() {
            return Ok(());
        }

        let channels = self.retriever.retrieve(&missing).await?;

        let mut registry = self.registry.lock().unwrap();
        let mut inserted = 0usize;
        for channel in channels {
            if let Entry::Vacant(slot) = registry.entry(channel.key) {
                let unit = UnaryCache::new(
                    channel,
                    self.settings.dynamic_buffer_capacity,
                    Arc::clone(&self.policy),
                )?;
                slot.insert(Arc::new(Mutex::new(unit)));
                inserted += 1;
            }
        }
        debug!(requested = missing.len(), inserted, "populated channel caches");
        Ok(())
    }

    /// Look up the cache for a channel.
    ///
    /// Never triggers population; callers must [`Cache::populate_missing`]
    /// first.
    pub fn get(&self, key: ChannelKey) -> CacheResult<Arc<Mutex<UnaryCache>>> {
        let registry = self.registry.lock().unwrap();
        registry.get(&key).cloned().ok_or(CacheError::NotFound(key))
    }

    /// Stop the GC sweep, close every channel cache, and clear the
    /// registry. Safe to call multiple times.
    pub fn close(&self) {
        if let Some(task) = self.gc_task.lock().unwrap().take() {
            task.abort();
        }
        let mut registry = self.registry.lock().unwrap();
        for unit in registry.values() {
            unit.lock().unwrap().close();
        }
        registry.clear();
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        if let Some(task) = self.gc_task.lock().unwrap().take() {
            task.abort();
        }
    }
}
