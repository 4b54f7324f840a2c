//! API key authentication.
//!
//! Keys arrive in the `X-API-Key` header, are hashed with SHA-256 and looked
//! up by digest. A key reads exactly one team unless it is an admin key.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use persistence::entities::{ApiKeyEntity, KeyRejection};
use persistence::repositories::ApiKeyRepository;
use shared::crypto::{is_well_formed_key, sha256_hex};
use sqlx::PgPool;

use crate::app::AppState;
use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "X-API-Key";

const INVALID_KEY: &str = "Invalid or missing API key";

/// Which teams a key may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    Admin,
    Team(i64),
    /// Non-admin key with no team binding; reads nothing.
    Unbound,
}

impl KeyScope {
    fn of(key: &ApiKeyEntity) -> Self {
        match (key.is_admin, key.team_id) {
            (true, _) => KeyScope::Admin,
            (false, Some(team_id)) => KeyScope::Team(team_id),
            (false, None) => KeyScope::Unbound,
        }
    }
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    pub api_key_id: i64,
    /// Non-secret prefix, safe to log (e.g. "sg_aBcDe123").
    pub key_prefix: String,
    pub scope: KeyScope,
}

impl ApiKeyAuth {
    /// Resolves a raw header value to an active key.
    pub async fn validate(pool: &PgPool, api_key: &str) -> Result<Self, ApiError> {
        if !is_well_formed_key(api_key) {
            return Err(ApiError::Unauthorized(INVALID_KEY.to_string()));
        }

        let repo = ApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&sha256_hex(api_key))
            .await
            .map_err(|e| ApiError::Internal(format!("API key lookup failed: {}", e)))?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_KEY.to_string()))?;

        match key.rejection_at(Utc::now()) {
            Some(KeyRejection::Revoked) => {
                return Err(ApiError::Unauthorized(INVALID_KEY.to_string()))
            }
            Some(KeyRejection::Expired) => {
                tracing::debug!(key_prefix = %key.key_prefix, "Expired API key presented");
                return Err(ApiError::Unauthorized("API key has expired".to_string()));
            }
            None => {}
        }

        // Detached; a failed stamp must not fail the request.
        let key_id = key.id;
        tokio::spawn(async move {
            if let Err(e) = repo.touch(key_id).await {
                tracing::warn!(key_id, error = %e, "Failed to stamp API key last use");
            }
        });

        Ok(ApiKeyAuth {
            api_key_id: key.id,
            scope: KeyScope::of(&key),
            key_prefix: key.key_prefix,
        })
    }

    pub fn can_access_team(&self, team_id: i64) -> bool {
        match self.scope {
            KeyScope::Admin => true,
            KeyScope::Team(bound) => bound == team_id,
            KeyScope::Unbound => false,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    /// Reuses the result of the auth middleware when it already ran.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<ApiKeyAuth>() {
            return Ok(auth.clone());
        }

        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized(INVALID_KEY.to_string()))?;

        Self::validate(&state.pool, api_key).await
    }
}
