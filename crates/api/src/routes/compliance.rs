//! Compliance percentage and status catalog handlers.

use axum::{extract::State, Json};
use chrono::Utc;
use domain::models::{ComplianceDataQuery, ComplianceDataResponse, ComplianceStatus};
use domain::services::aggregate;
use persistence::repositories::{ComplianceRecordRepository, ComplianceStatusRepository};
use shared::validation::parse_iso_date;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, TeamAccess};
use crate::services::{day_window, trailing_window, TeamSnapshot};

/// Compliance percentages per active PPE item.
///
/// GET /api/v1/teams/:slug/compliance-data
pub async fn get_compliance_data(
    State(state): State<AppState>,
    access: TeamAccess,
    ApiQuery(query): ApiQuery<ComplianceDataQuery>,
) -> Result<Json<ComplianceDataResponse>, ApiError> {
    let window = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => day_window(parse_iso_date(date)?),
        None => trailing_window(Utc::now(), state.config.compliance.default_window_days),
    };

    let team_id = access.team.id;
    let record_repo = ComplianceRecordRepository::new(state.pool.clone());
    let (active, records) = tokio::try_join!(
        TeamSnapshot::load_active_items(&state.pool, team_id),
        record_repo.list_in_window(
            team_id,
            window.from,
            window.to,
            state.config.compliance.max_records as i64,
        ),
    )?;

    let tally = aggregate(&records, &active);
    let response = tally.to_response(&active);

    info!(
        team_id,
        records = records.len(),
        active_items = active.len(),
        overall = response.overall,
        "Compliance data computed"
    );

    Ok(Json(response))
}

/// Statuses the team can assign, in display order.
///
/// GET /api/v1/teams/:slug/compliance-statuses
pub async fn list_compliance_statuses(
    State(state): State<AppState>,
    access: TeamAccess,
) -> Result<Json<Vec<ComplianceStatus>>, ApiError> {
    let repo = ComplianceStatusRepository::new(state.pool.clone());
    let statuses: Vec<ComplianceStatus> = repo
        .list_for_team(access.team.id)
        .await?
        .into_iter()
        .map(ComplianceStatus::from)
        .collect();

    Ok(Json(statuses))
}
