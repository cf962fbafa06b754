//! Cache configuration.

use std::num::NonZeroUsize;

use serde::Deserialize;

const DEFAULT_RESPONSE_LIMIT: usize = 200;

/// Cache tunables from `vetrina.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the tagged object cache for read accessors.
    pub enable_object_cache: bool,
    /// Enable the public response path cache.
    pub enable_response_cache: bool,
    /// Maximum responses held by the path cache.
    pub response_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_object_cache: true,
            enable_response_cache: true,
            response_limit: DEFAULT_RESPONSE_LIMIT,
        }
    }
}

impl CacheConfig {
    /// Returns the response limit as NonZeroUsize, clamping to 1 if zero.
    pub fn response_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.response_limit).unwrap_or(NonZeroUsize::MIN)
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enable_object_cache: settings.enable_object_cache,
            enable_response_cache: settings.enable_response_cache,
            response_limit: settings.response_limit,
        }
    }
}
