//! Violation trend handler.

use axum::{extract::State, Json};
use chrono::Utc;
use domain::models::{TrendDataPoint, TrendPeriod, TrendQuery};
use domain::services::{build_trends, range_start, TrendOptions};
use persistence::repositories::ComplianceRecordRepository;
use tracing::info;

use crate::app::AppState;
use crate::config::TrendsConfig;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, TeamAccess};
use crate::services::{since_day, TeamSnapshot};

fn trend_options(query: &TrendQuery, config: &TrendsConfig) -> Result<TrendOptions, ApiError> {
    let period = match query.period.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.parse::<TrendPeriod>().map_err(ApiError::Validation)?,
        None => TrendPeriod::default(),
    };
    let buckets = match period {
        TrendPeriod::Week => config.weekly_buckets,
        TrendPeriod::Month => config.monthly_buckets,
    };
    Ok(TrendOptions {
        period,
        buckets,
        demo_mode: config.demo_mode,
    })
}

/// Violations per active PPE item over weekly or monthly buckets.
///
/// GET /api/v1/teams/:slug/trends
pub async fn get_trends(
    State(state): State<AppState>,
    access: TeamAccess,
    ApiQuery(query): ApiQuery<TrendQuery>,
) -> Result<Json<Vec<TrendDataPoint>>, ApiError> {
    let options = trend_options(&query, &state.config.trends)?;
    let now = Utc::now();
    let end = now.date_naive();
    let window = since_day(range_start(end, options.period, options.buckets), now);

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

    let points = build_trends(&records, &active, end, &options);

    info!(
        team_id,
        period = ?options.period,
        buckets = points.len(),
        records = records.len(),
        "Trends computed"
    );

    Ok(Json(points))
}
