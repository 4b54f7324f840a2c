//! Short-lived response cache for authenticated GET requests.
//!
//! Collapses bursts of identical dashboard requests into one computation.
//! Entries are keyed by method, path, query and API key, so one key never
//! sees a response computed for another. Successful writes under a team
//! drop that team's entries.

use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::cache::TtlCache;
use std::time::Duration;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::ApiKeyAuth;
use crate::middleware::metrics::{record_cache_hit, record_cache_miss};

/// Header reporting `HIT`, `MISS` or `BYPASS` on cacheable requests.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Larger bodies are not buffered into the cache.
const MAX_CACHED_BODY_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CachedResponse {
    content_type: Option<HeaderValue>,
    body: Bytes,
}

impl CachedResponse {
    fn into_http_response(self, cache_status: &'static str) -> Response {
        let mut response = Response::new(Body::from(self.body));
        if let Some(content_type) = self.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        response
            .headers_mut()
            .insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));
        response
    }
}

pub type ResponseCache = TtlCache<String, CachedResponse>;

/// Builds the cache, or `None` when the TTL is zero.
pub fn build_response_cache(ttl_secs: u64, max_entries: usize) -> Option<ResponseCache> {
    if ttl_secs == 0 {
        return None;
    }
    Some(TtlCache::new(Duration::from_secs(ttl_secs), max_entries))
}

pub fn cache_key(method: &Method, uri: &Uri, api_key_id: i64) -> String {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("{} {} key={}", method, path_and_query, api_key_id)
}

/// `/teams/{slug}/` for paths under a team, used to invalidate its entries.
fn team_scope(path: &str) -> Option<String> {
    let rest = path.split("/teams/").nth(1)?;
    let slug = rest.split('/').next().filter(|s| !s.is_empty())?;
    Some(format!("/teams/{}/", slug))
}

/// Bodies of unknown or oversized length stream through uncached.
fn fits_in_cache(body: &Body) -> bool {
    body.size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_CACHED_BODY_BYTES as u64)
}

/// Middleware serving and filling the response cache.
///
/// Must run after [`super::auth::require_auth`]; requests without an
/// authenticated key bypass the cache.
pub async fn response_cache_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(cache) = state.response_cache.clone() else {
        return next.run(req).await;
    };

    if req.method() != Method::GET {
        let scope = team_scope(req.uri().path());
        let response = next.run(req).await;
        if response.status().is_success() {
            if let Some(scope) = scope {
                cache.remove_where(|key| key.contains(&scope));
            }
        }
        return response;
    }

    let Some(api_key_id) = req.extensions().get::<ApiKeyAuth>().map(|a| a.api_key_id) else {
        return next.run(req).await;
    };
    let key = cache_key(req.method(), req.uri(), api_key_id);

    if let Some(cached) = cache.get(&key) {
        record_cache_hit();
        return cached.into_http_response("HIT");
    }
    record_cache_miss();

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    if !fits_in_cache(response.body()) {
        let mut response = response;
        response
            .headers_mut()
            .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("BYPASS"));
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::Internal(format!("Failed to buffer response body: {}", e))
                .into_response();
        }
    };

    cache.insert(
        key,
        CachedResponse {
            content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
            body: bytes.clone(),
        },
    );
    parts
        .headers
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}
