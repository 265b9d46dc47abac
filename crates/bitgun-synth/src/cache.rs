//! Bounded in-memory render cache.
//!
//! Entries are keyed by the parameters rounded to thousandths plus the packed
//! selector word. Cached buffers are shared through `Arc` and are never
//! mutated after insertion.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bitgun_seed::{ParameterVector, TraitSelectors};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::generators::waves::round_half_up;

/// Default number of cached renders.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// What happens when the cache is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Stop admitting new keys once full. Nothing is evicted.
    #[default]
    Fill,
    /// Evict the least recently used entry.
    Lru,
}

/// Cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries.
    pub capacity: usize,
    /// Admission/eviction policy.
    pub policy: CachePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            policy: CachePolicy::Fill,
        }
    }
}

/// Render cache key.
///
/// Displays as `"{f}_{d}_{n}_{c}#{word:04X}"` where each parameter is
/// multiplied by 1000 and rounded half up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    millis: [i64; 4],
    selectors: u16,
}

impl CacheKey {
    /// Builds the key for a parameter vector and selector set.
    pub fn new(params: &ParameterVector, traits: &TraitSelectors) -> Self {
        let millis = params.to_array().map(|v| round_half_up(v * 1000.0) as i64);
        Self {
            millis,
            selectors: traits.word(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [fr, de, no, cr] = self.millis;
        write!(f, "{fr}_{de}_{no}_{cr}#{:04X}", self.selectors)
    }
}

/// A cached buffer and the tick of its last use.
#[derive(Debug)]
struct Entry {
    buffer: Arc<SampleBuffer>,
    last_used: u64,
}

/// Bounded map from [`CacheKey`] to rendered buffers.
///
/// Under `Lru` a hit only bumps the entry's tick; the scan for the least
/// recent entry happens on eviction, so it costs `O(capacity)` per insert
/// into a full cache.
#[derive(Debug, Default)]
pub struct RenderCache {
    config: CacheConfig,
    entries: HashMap<CacheKey, Entry>,
    tick: u64,
}

impl RenderCache {
    /// Creates an empty cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            // capacity comes from user config; only preallocate the default
            entries: HashMap::with_capacity(config.capacity.min(DEFAULT_CACHE_CAPACITY)),
            tick: 0,
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Looks up a key, refreshing its recency under `Lru`.
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<SampleBuffer>> {
        let tick = self.next_tick();
        let lru = self.config.policy == CachePolicy::Lru;
        let hit = self.entries.get_mut(key).map(|entry| {
            if lru {
                entry.last_used = tick;
            }
            Arc::clone(&entry.buffer)
        });
        debug!(key = %key, hit = hit.is_some(), "cache lookup");
        hit
    }

    /// Offers a buffer to the cache. Returns whether it was stored.
    pub fn insert(&mut self, key: CacheKey, buffer: Arc<SampleBuffer>) -> bool {
        if self.config.capacity == 0 {
            return false;
        }
        let last_used = self.next_tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.buffer = buffer;
            entry.last_used = last_used;
            return true;
        }

        if self.entries.len() >= self.config.capacity {
            match self.config.policy {
                CachePolicy::Fill => {
                    debug!(key = %key, "cache full, not admitted");
                    return false;
                }
                CachePolicy::Lru => self.evict_least_recent(),
            }
        }

        self.entries.insert(key, Entry { buffer, last_used });
        debug!(key = %key, len = self.entries.len(), "cache admitted");
        true
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| *key);
        if let Some(evicted) = oldest {
            self.entries.remove(&evicted);
            debug!(key = %evicted, "cache evicted");
        }
    }

    /// Whether `key` is cached. Does not affect recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn policy(&self) -> CachePolicy {
        self.config.policy
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
