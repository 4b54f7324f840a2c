//! Alert listing and alert workflow handlers.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use domain::models::{
    AlertStatusResponse, Comment, ComplianceStatus, CreateCommentRequest, ListAlertsQuery,
    ListAlertsResponse, UpdateAlertStatusRequest,
};
use domain::services::{distinct_severities, extract_alerts, summarize, AlertFilter};
use persistence::repositories::{
    ComplianceRecordRepository, ComplianceStatusRepository, FilterRepository,
};
use shared::pagination::PageWindow;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::config::ComplianceConfig;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, TeamAccess};
use crate::middleware::metrics::record_alerts_generated;
use crate::services::{date_range_window, TeamSnapshot};

/// Rejects limits outside `1..=max_alert_limit` instead of clamping them.
pub(crate) fn check_limit(limit: Option<usize>, config: &ComplianceConfig) -> Result<(), ApiError> {
    match limit {
        Some(limit) if limit == 0 || limit > config.max_alert_limit => Err(ApiError::Validation(
            format!("limit must be between 1 and {}", config.max_alert_limit),
        )),
        _ => Ok(()),
    }
}

/// Alerts in a window with filters, pagination and summary stats.
///
/// GET /api/v1/teams/:slug/alerts/all-alerts
pub async fn list_all_alerts(
    State(state): State<AppState>,
    access: TeamAccess,
    ApiQuery(query): ApiQuery<ListAlertsQuery>,
) -> Result<Json<ListAlertsResponse>, ApiError> {
    let limits = &state.config.compliance;
    check_limit(query.limit, limits)?;
    let filter = AlertFilter::from_query(&query)?;
    let page = PageWindow::resolve(
        query.limit,
        query.offset,
        limits.default_alert_limit,
        limits.max_alert_limit,
    );
    let window = date_range_window(
        filter.start_date,
        filter.end_date,
        Utc::now(),
        limits.default_window_days,
    );

    let team_id = access.team.id;
    let record_repo = ComplianceRecordRepository::new(state.pool.clone());
    let filter_repo = FilterRepository::new(state.pool.clone());
    let (snapshot, records, zones) = tokio::try_join!(
        TeamSnapshot::load(&state.pool, team_id),
        record_repo.list_in_window(team_id, window.from, window.to, limits.max_records as i64),
        filter_repo.list_zone_names(team_id),
    )?;

    let extracted = extract_alerts(&records, &snapshot.extraction());
    record_alerts_generated(extracted.len());
    let alerts = filter.apply(extracted);
    let stats = summarize(&alerts);
    let total = alerts.len();

    let mut page_alerts = page.slice(&alerts).to_vec();
    let ids: Vec<i64> = page_alerts.iter().map(|a| a.id).collect();
    let mut comments = record_repo.comments_by_record(&ids).await?;
    for alert in page_alerts.iter_mut() {
        if let Some(list) = comments.remove(&alert.id) {
            alert.comments = list;
        }
    }

    info!(
        team_id,
        records = records.len(),
        alerts = total,
        returned = page_alerts.len(),
        "Alerts listed"
    );

    Ok(Json(ListAlertsResponse {
        alerts: page_alerts,
        total,
        limit: page.limit,
        offset: page.offset,
        stats,
        zones,
        statuses: snapshot.statuses.as_slice().to_vec(),
        severities: distinct_severities(&records),
    }))
}

/// Moves an alert's record to another team status.
///
/// PUT /api/v1/teams/:slug/alerts/:id/status
pub async fn update_alert_status(
    State(state): State<AppState>,
    access: TeamAccess,
    ApiPath((_slug, record_id)): ApiPath<(String, i64)>,
    ApiJson(request): ApiJson<UpdateAlertStatusRequest>,
) -> Result<Json<AlertStatusResponse>, ApiError> {
    let team_id = access.team.id;

    let status: ComplianceStatus = ComplianceStatusRepository::new(state.pool.clone())
        .find_in_team(team_id, request.status_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Status not found".to_string()))?
        .into();

    let updated = ComplianceRecordRepository::new(state.pool.clone())
        .update_status(team_id, record_id, status.id)
        .await?;
    if !updated {
        return Err(ApiError::NotFound("Alert not found".to_string()));
    }

    info!(
        team_id,
        record_id,
        status = %status.code,
        api_key_id = access.auth.api_key_id,
        "Alert status updated"
    );

    Ok(Json(AlertStatusResponse {
        id: record_id,
        status,
    }))
}

/// Adds a comment to an alert's record.
///
/// POST /api/v1/teams/:slug/alerts/:id/comments
pub async fn create_alert_comment(
    State(state): State<AppState>,
    access: TeamAccess,
    ApiPath((_slug, record_id)): ApiPath<(String, i64)>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    request.validate()?;

    let team_id = access.team.id;
    let repo = ComplianceRecordRepository::new(state.pool.clone());
    if repo.find_in_team(team_id, record_id).await?.is_none() {
        return Err(ApiError::NotFound("Alert not found".to_string()));
    }

    let comment: Comment = repo
        .add_comment(record_id, request.author.trim(), &request.text)
        .await?
        .into();

    info!(team_id, record_id, comment_id = comment.id, "Alert comment added");

    Ok((StatusCode::CREATED, Json(comment)))
}
