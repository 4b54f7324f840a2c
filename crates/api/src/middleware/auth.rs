//! Authentication middleware.
//!
//! Provides middleware for requiring API key authentication on routes.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::{ApiKeyAuth, API_KEY_HEADER};

/// Middleware that requires API key authentication.
///
/// Rejects requests without a valid `X-API-Key` header. The authenticated
/// key is stored in request extensions for the response cache and handlers.
/// Team binding is checked later, once the team is known.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let api_key = match req.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(key) => key.to_string(),
        None => {
            return ApiError::Unauthorized("Invalid or missing API key".to_string())
                .into_response();
        }
    };

    match ApiKeyAuth::validate(&state.pool, &api_key).await {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
