//! Vetrina cache system.
//!
//! Two cooperating layers keep public reads consistent with admin writes:
//!
//! - **Tagged object store**: memoized query results grouped by cache tags,
//!   invalidated in bulk when a resource kind changes.
//! - **Response path cache**: rendered public responses keyed by request
//!   path, invalidated per-path.
//!
//! The [`Revalidator`] is the single write-side entry point: given a resource
//! kind (and optional entity id) it computes the full invalidation set of
//! tags and paths and applies it against both layers.

mod config;
mod lock;
mod middleware;
mod paths;
mod revalidate;
mod store;
pub mod tags;

pub use config::CacheConfig;
pub use middleware::{ResponseCacheState, response_cache_layer};
pub use paths::{CachedResponse, PathCache};
pub use revalidate::{InvalidationError, PathInvalidator, Revalidator, TagInvalidator};
pub use store::{CacheKey, CachedValue, TaggedStore};
pub use tags::{CacheTag, ResourceKind};
