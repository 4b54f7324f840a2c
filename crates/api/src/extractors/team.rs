//! Team scope extractor.
//!
//! Resolves the `:slug` path segment to a team and checks that the calling
//! API key may read it.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use domain::models::Team;
use persistence::repositories::TeamRepository;
use shared::validation::validate_team_slug;
use std::collections::HashMap;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::ApiKeyAuth;

/// The team a request is scoped to, plus the key that reached it.
#[derive(Debug, Clone)]
pub struct TeamAccess {
    pub team: Team,
    pub auth: ApiKeyAuth,
}

#[async_trait]
impl FromRequestParts<AppState> for TeamAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = ApiKeyAuth::from_request_parts(parts, state).await?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        let slug = params
            .get("slug")
            .ok_or_else(|| ApiError::Validation("Team slug is required".to_string()))?;
        validate_team_slug(slug)?;

        let team = TeamRepository::new(state.pool.clone())
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

        if !auth.can_access_team(team.id) {
            tracing::warn!(
                api_key_id = auth.api_key_id,
                team_id = team.id,
                "API key not authorized for team"
            );
            return Err(ApiError::Unauthorized(
                "API key is not authorized for this team".to_string(),
            ));
        }

        Ok(TeamAccess {
            team: team.into(),
            auth,
        })
    }
}
