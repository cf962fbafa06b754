//! Response path cache: rendered public responses keyed by request path.

use std::sync::RwLock;

use bytes::Bytes;
use lru::LruCache;
use metrics::counter;

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::paths";

const METRIC_HIT: &str = "vetrina_response_cache_hit_total";
const METRIC_MISS: &str = "vetrina_response_cache_miss_total";

/// Cached HTTP response.
#[derive(Clone)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

/// LRU cache of rendered public responses.
///
/// Paths are client-controlled input, so unlike the tagged object store this
/// layer keeps a capacity bound.
pub struct PathCache {
    responses: RwLock<LruCache<String, CachedResponse>>,
}

impl PathCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            responses: RwLock::new(LruCache::new(config.response_limit_non_zero())),
        }
    }

    pub fn get(&self, path: &str) -> Option<CachedResponse> {
        let found = rw_write(&self.responses, SOURCE, "get")
            .get(path)
            .cloned();
        match found {
            Some(response) => {
                counter!(METRIC_HIT).increment(1);
                Some(response)
            }
            None => {
                counter!(METRIC_MISS).increment(1);
                None
            }
        }
    }

    pub fn set(&self, path: String, response: CachedResponse) {
        rw_write(&self.responses, SOURCE, "set").put(path, response);
    }

    /// Drop the cached response for one path. Idempotent.
    pub fn invalidate_path(&self, path: &str) {
        rw_write(&self.responses, SOURCE, "invalidate_path").pop(path);
    }

    pub fn invalidate_all(&self) {
        rw_write(&self.responses, SOURCE, "invalidate_all").clear();
    }

    pub fn len(&self) -> usize {
        rw_read(&self.responses, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response(body: &'static str) -> CachedResponse {
        CachedResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn roundtrip_and_invalidate() {
        let cache = PathCache::new(&CacheConfig::default());

        assert!(cache.get("/careers").is_none());
        cache.set("/careers".to_string(), sample_response("{}"));

        let cached = cache.get("/careers").expect("cached response");
        assert_eq!(cached.status, 200);

        cache.invalidate_path("/careers");
        assert!(cache.get("/careers").is_none());
        // Invalidating an absent path is fine.
        cache.invalidate_path("/careers");
    }

    #[test]
    fn lru_eviction_honors_limit() {
        let config = CacheConfig {
            response_limit: 2,
            ..Default::default()
        };
        let cache = PathCache::new(&config);

        cache.set("/".to_string(), sample_response("a"));
        cache.set("/about".to_string(), sample_response("b"));
        cache.set("/careers".to_string(), sample_response("c"));

        assert!(cache.get("/").is_none());
        assert!(cache.get("/about").is_some());
        assert!(cache.get("/careers").is_some());
    }
}
