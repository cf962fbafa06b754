//! Tagged object store: memoized read results grouped by cache tags.
//!
//! Each entry is keyed by the accessor shape that produced it and registered
//! under the tags that should invalidate it. The store is injected into the
//! read layer as an explicit dependency so tests can assert invalidation
//! calls precisely.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use metrics::counter;

use crate::domain::entities::{
    CategoryRecord, JobOpeningRecord, ProductRecord, StatisticRecord, TestimonialRecord,
};

use super::lock::{rw_read, rw_write};
use super::tags::CacheTag;

const SOURCE: &str = "cache::store";

const METRIC_HIT: &str = "vetrina_cache_hit_total";
const METRIC_MISS: &str = "vetrina_cache_miss_total";
const METRIC_INVALIDATED: &str = "vetrina_cache_invalidated_entries_total";

/// Cache keys, one per read accessor shape.
///
/// Parametric keys memoize per category so reads for different categories
/// fill separate slots. Eviction is governed by the registered tags, not by
/// the key: entries sharing a tag are invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    ActiveCategories,
    ProductsForCategory(uuid::Uuid),
    OpenJobs,
    PublishedTestimonials,
    Statistics,
}

/// Memoized values, mirroring [`CacheKey`] variants.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Categories(Vec<CategoryRecord>),
    Products(Vec<ProductRecord>),
    Jobs(Vec<JobOpeningRecord>),
    Testimonials(Vec<TestimonialRecord>),
    Statistics(Vec<StatisticRecord>),
}

struct Entry {
    value: CachedValue,
    tags: HashSet<CacheTag>,
}

/// Tagged object cache.
///
/// Entries are unbounded within the process lifetime: the key space is a
/// closed enum plus one slot per category, and invalidation is the only
/// removal path. Invalidating a tag with no registered entries is a no-op.
pub struct TaggedStore {
    entries: RwLock<HashMap<CacheKey, Entry>>,
    tag_index: RwLock<HashMap<CacheTag, HashSet<CacheKey>>>,
}

impl TaggedStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            tag_index: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let found = rw_read(&self.entries, SOURCE, "get")
            .get(key)
            .map(|entry| entry.value.clone());
        match found {
            Some(value) => {
                counter!(METRIC_HIT).increment(1);
                Some(value)
            }
            None => {
                counter!(METRIC_MISS).increment(1);
                None
            }
        }
    }

    /// Store a value and register it under every tag in `tags`.
    pub fn set(&self, key: CacheKey, value: CachedValue, tags: HashSet<CacheTag>) {
        let mut entries = rw_write(&self.entries, SOURCE, "set.entries");
        let mut index = rw_write(&self.tag_index, SOURCE, "set.tag_index");

        // Re-setting a key under different tags must drop the stale index rows.
        if let Some(previous) = entries.get(&key) {
            for tag in &previous.tags {
                if let Some(keys) = index.get_mut(tag) {
                    keys.remove(&key);
                    if keys.is_empty() {
                        index.remove(tag);
                    }
                }
            }
        }

        for tag in &tags {
            index.entry(*tag).or_default().insert(key);
        }
        entries.insert(key, Entry { value, tags });
    }

    /// Drop every entry registered under `tag`. Idempotent.
    pub fn invalidate_tag(&self, tag: &CacheTag) {
        let mut entries = rw_write(&self.entries, SOURCE, "invalidate.entries");
        let mut index = rw_write(&self.tag_index, SOURCE, "invalidate.tag_index");

        let Some(keys) = index.remove(tag) else {
            return;
        };

        let mut dropped = 0u64;
        for key in keys {
            if let Some(entry) = entries.remove(&key) {
                dropped += 1;
                // The entry may be registered under other tags too.
                for other in entry.tags.iter().filter(|other| *other != tag) {
                    if let Some(peers) = index.get_mut(other) {
                        peers.remove(&key);
                        if peers.is_empty() {
                            index.remove(other);
                        }
                    }
                }
            }
        }
        counter!(METRIC_INVALIDATED).increment(dropped);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        rw_read(&self.entries, SOURCE, "contains").contains_key(key)
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cached data and tag registrations.
    pub fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear.entries").clear();
        rw_write(&self.tag_index, SOURCE, "clear.tag_index").clear();
    }
}

impl Default for TaggedStore {
    fn default() -> Self {
        Self::new()
    }
}
