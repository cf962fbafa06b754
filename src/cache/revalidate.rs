//! Revalidation dispatcher.
//!
//! The single write-side entry point for cache invalidation: mutation
//! services call [`Revalidator::revalidate`] after a successful write, and
//! the dispatcher fans the resource kind out to tag, admin-path, and
//! public-path invalidation. A failure against one target is logged and
//! counted but never stops the remaining targets, and it never propagates
//! back into the mutation: the write already committed, so the worst case is
//! one stale entry, not a failed request.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use super::paths::PathCache;
use super::store::TaggedStore;
use super::tags::{CacheTag, ResourceKind};

const METRIC_FAILURE: &str = "vetrina_revalidation_failure_total";

/// Failure reported by an invalidation target.
#[derive(Debug, Error)]
pub enum InvalidationError {
    #[error("invalidation target unavailable: {0}")]
    Unavailable(String),
}

/// Write side of the tagged object cache.
pub trait TagInvalidator: Send + Sync {
    fn invalidate_tag(&self, tag: &CacheTag) -> Result<(), InvalidationError>;
}

/// Write side of a rendered-path cache.
pub trait PathInvalidator: Send + Sync {
    fn invalidate_path(&self, path: &str) -> Result<(), InvalidationError>;
}

impl TagInvalidator for TaggedStore {
    fn invalidate_tag(&self, tag: &CacheTag) -> Result<(), InvalidationError> {
        TaggedStore::invalidate_tag(self, tag);
        Ok(())
    }
}

impl PathInvalidator for PathCache {
    fn invalidate_path(&self, path: &str) -> Result<(), InvalidationError> {
        PathCache::invalidate_path(self, path);
        Ok(())
    }
}

/// Dispatches invalidation for one mutated resource across all targets.
pub struct Revalidator {
    tags: Arc<dyn TagInvalidator>,
    admin_paths: Arc<dyn PathInvalidator>,
    public_paths: Arc<dyn PathInvalidator>,
}

impl Revalidator {
    pub fn new(
        tags: Arc<dyn TagInvalidator>,
        admin_paths: Arc<dyn PathInvalidator>,
        public_paths: Arc<dyn PathInvalidator>,
    ) -> Self {
        Self {
            tags,
            admin_paths,
            public_paths,
        }
    }

    /// Invalidate everything that depends on `kind`.
    ///
    /// `dynamic_id` narrows the fan-out: the owning category for products,
    /// the category itself for categories. Passing `None` still invalidates
    /// the resource-wide tags and paths, so a caller that cannot name the
    /// id stays correct at the cost of wider eviction.
    pub fn revalidate(&self, kind: ResourceKind, dynamic_id: Option<Uuid>) {
        debug!(resource = ?kind, dynamic_id = ?dynamic_id, "revalidating caches");

        for tag in kind.tags(dynamic_id) {
            if let Err(error) = self.tags.invalidate_tag(&tag) {
                counter!(METRIC_FAILURE, "target" => "tags").increment(1);
                warn!(%tag, %error, "tag invalidation failed; entry may be stale");
            }
        }

        for path in kind.admin_paths() {
            if let Err(error) = self.admin_paths.invalidate_path(path) {
                counter!(METRIC_FAILURE, "target" => "admin_paths").increment(1);
                warn!(path, %error, "admin path invalidation failed; page may be stale");
            }
        }

        for path in kind.public_paths(dynamic_id) {
            if let Err(error) = self.public_paths.invalidate_path(&path) {
                counter!(METRIC_FAILURE, "target" => "public_paths").increment(1);
                warn!(path, %error, "public path invalidation failed; page may be stale");
            }
        }
    }
}
