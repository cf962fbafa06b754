//! Response cache middleware for public routes.
//!
//! Caches GET requests that return 200 OK and serves cached responses on the
//! next hit. Everything else passes through untouched.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use super::paths::{CachedResponse, PathCache};
use super::CacheConfig;

const MAX_CACHED_BODY: usize = 1024 * 1024;

/// Shared cache state for the response middleware.
#[derive(Clone)]
pub struct ResponseCacheState {
    pub config: CacheConfig,
    pub paths: Arc<PathCache>,
}

/// Caches successful GET responses keyed by request path.
///
/// The path is the whole key: public routes are query-free, and the
/// revalidator invalidates by path, so the key must match what
/// `ResourceKind::public_paths` produces.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn response_cache_layer(
    State(cache): State<ResponseCacheState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !cache.config.enable_response_cache {
        return next.run(request).await;
    }

    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();

    if let Some(cached) = cache.paths.get(&path) {
        debug!(cache = "response", outcome = "hit", "serving cached response");
        return build_response(cached);
    }

    debug!(
        cache = "response",
        outcome = "miss",
        "cache miss, executing handler"
    );

    let response = next.run(request).await;

    // Only successful responses are cached.
    if response.status() == StatusCode::OK {
        let (parts, body) = response.into_parts();
        let bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(cache = "response", %error, "failed to buffer response body");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        if bytes.len() <= MAX_CACHED_BODY {
            let cached = CachedResponse {
                status: parts.status.as_u16(),
                headers: parts
                    .headers
                    .iter()
                    .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
                    .collect(),
                body: bytes.clone(),
            };

            debug!(cache = "response", "caching response");
            cache.paths.set(path, cached);
        } else {
            debug!(cache = "response", size = bytes.len(), "body too large to cache");
        }

        Response::from_parts(parts, Body::from(bytes))
    } else {
        response
    }
}

/// Build a response from cached data.
fn build_response(cached: CachedResponse) -> Response {
    use axum::http::HeaderValue;

    let mut builder = Response::builder().status(cached.status);

    for (name, value) in cached.headers {
        if let Ok(header_value) = HeaderValue::from_str(&value) {
            builder = builder.header(name, header_value);
        }
    }

    builder
        .body(Body::from(cached.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn build_response_restores_status_and_headers() {
        let cached = CachedResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from_static(b"[]"),
        };

        let response = build_response(cached);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn build_response_skips_invalid_header_values() {
        let cached = CachedResponse {
            status: 200,
            headers: vec![("x-bad".to_string(), "line\nbreak".to_string())],
            body: Bytes::new(),
        };

        let response = build_response(cached);
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-bad").is_none());
    }
}
