//! Per-channel cache unit.

use std::sync::Arc;

use telem_core::{CacheResult, Channel, TimeSpan, TimeStamp};
use tracing::debug;

use crate::dynamic::DynamicCache;
use crate::interval::{IntervalRead, StaticCache};

/// Policy deciding which historical entries survive a GC pass.
///
/// The current rolling buffer is never subject to the policy; only
/// historical entries are offered for eviction.
pub trait RetentionPolicy: Send + Sync {
    /// Whether the entry should be kept.
    fn retain(&self, entry: &IntervalRead) -> bool;
}

/// Policy that never evicts.
#[derive(Debug, Default)]
pub struct KeepAll;

impl RetentionPolicy for KeepAll {
    fn retain(&self, _entry: &IntervalRead) -> bool {
        true
    }
}

/// Policy that keeps entries overlapping a trailing window ending now.
#[derive(Debug)]
pub struct KeepWithin {
    /// How far back from now entries are kept.
    pub horizon: TimeSpan,
}

impl RetentionPolicy for KeepWithin {
    fn retain(&self, entry: &IntervalRead) -> bool {
        let now = TimeStamp::now();
        let window = (now - self.horizon).range(now);
        entry.time_range().overlaps_with(&window)
    }
}

/// Per-channel cache unit binding a live tail to a historical interval
/// cache.
pub struct UnaryCache {
    channel: Channel,
    dynamic: DynamicCache,
    history: StaticCache,
    policy: Arc<dyn RetentionPolicy>,
    span: tracing::Span,
    closed: bool,
}

impl UnaryCache {
    /// Create a cache unit for `channel` with the given live-buffer
    /// capacity and retention policy.
    pub fn new(
        channel: Channel,
        capacity: usize,
        policy: Arc<dyn RetentionPolicy>,
    ) -> CacheResult<Self> {
        let span = tracing::debug_span!("channel_cache", key = channel.key, name = %channel.name);
        let dynamic = DynamicCache::new(capacity, channel.data_type)?;
        Ok(Self {
            channel,
            dynamic,
            history: StaticCache::new(),
            policy,
            span,
            closed: false,
        })
    }

    /// The channel this unit caches.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// The live-tail cache.
    pub fn dynamic(&self) -> &DynamicCache {
        &self.dynamic
    }

    /// Mutable access to the live-tail cache.
    pub fn dynamic_mut(&mut self) -> &mut DynamicCache {
        &mut self.dynamic
    }

    /// The historical interval cache.
    pub fn history(&self) -> &StaticCache {
        &self.history
    }

    /// Mutable access to the historical interval cache.
    pub fn history_mut(&mut self) -> &mut StaticCache {
        &mut self.history
    }

    /// Release historical entries the retention policy no longer wants.
    pub fn garbage_collect(&mut self) {
        if self.closed {
            return;
        }
        let _guard = self.span.enter();
        let policy = Arc::clone(&self.policy);
        let removed = self.history.retain(|entry| policy.retain(entry));
        if removed > 0 {
            debug!(
                removed,
                remaining = self.history.len(),
                "released historical entries"
            );
        }
    }

    /// Release all owned buffers and entries. Safe to call multiple times.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _guard = self.span.enter();
        self.history.clear();
        self.dynamic.reset();
        debug!("closed channel cache");
    }
}
