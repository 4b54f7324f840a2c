//! Repeat-offender and high-risk-zone handlers.

use axum::{extract::State, Json};
use chrono::Utc;
use domain::models::{Alert, RankingOptions, RiskRankingQuery, WorkerRiskEntry, ZoneRiskData};
use domain::services::{extract_alerts, rank_workers, rank_zones};
use persistence::repositories::ComplianceRecordRepository;
use std::str::FromStr;
use tracing::info;

use crate::app::AppState;
use crate::config::ComplianceConfig;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, TeamAccess};
use crate::middleware::metrics::record_alerts_generated;
use crate::routes::alerts::check_limit;
use crate::services::{trailing_window, TeamSnapshot};

/// Parses an optional query enum, blank meaning the default.
fn parse_or_default<T>(value: Option<&str>) -> Result<T, ApiError>
where
    T: FromStr<Err = String> + Default,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.parse().map_err(ApiError::Validation),
        None => Ok(T::default()),
    }
}

/// Resolves ranking options, falling back to `default_min_violations`.
fn ranking_options(
    query: &RiskRankingQuery,
    default_min_violations: u64,
    config: &ComplianceConfig,
) -> Result<RankingOptions, ApiError> {
    check_limit(query.limit, config)?;
    Ok(RankingOptions {
        min_violations: query.min_violations.unwrap_or(default_min_violations),
        limit: query.limit.unwrap_or(config.default_alert_limit),
        sort_by: parse_or_default(query.sort_by.as_deref())?,
        order: parse_or_default(query.sort_order.as_deref())?,
    })
}

fn window_days(query: &RiskRankingQuery, config: &ComplianceConfig) -> Result<i64, ApiError> {
    match query.days {
        Some(days) if days <= 0 => Err(ApiError::Validation(
            "days must be a positive number".to_string(),
        )),
        Some(days) => Ok(days),
        None => Ok(config.default_window_days),
    }
}

/// Extracts the team's alerts over the requested look-back window.
async fn alerts_in_window(
    state: &AppState,
    team_id: i64,
    days: i64,
) -> Result<Vec<Alert>, ApiError> {
    let window = trailing_window(Utc::now(), days);
    let record_repo = ComplianceRecordRepository::new(state.pool.clone());
    let (snapshot, records) = tokio::try_join!(
        TeamSnapshot::load(&state.pool, team_id),
        record_repo.list_in_window(
            team_id,
            window.from,
            window.to,
            state.config.compliance.max_records as i64,
        ),
    )?;

    let alerts = extract_alerts(&records, &snapshot.extraction());
    record_alerts_generated(alerts.len());
    Ok(alerts)
}

/// Workers ranked by PPE violations.
///
/// GET /api/v1/teams/:slug/repeat-offenders
pub async fn list_repeat_offenders(
    State(state): State<AppState>,
    access: TeamAccess,
    ApiQuery(query): ApiQuery<RiskRankingQuery>,
) -> Result<Json<Vec<WorkerRiskEntry>>, ApiError> {
    let config = &state.config.compliance;
    let options = ranking_options(&query, config.offender_min_violations, config)?;
    let days = window_days(&query, config)?;

    let team_id = access.team.id;
    let alerts = alerts_in_window(&state, team_id, days).await?;
    let ranked = rank_workers(&alerts, &options, &config.risk_thresholds());

    info!(
        team_id,
        alerts = alerts.len(),
        workers = ranked.len(),
        min_violations = options.min_violations,
        "Repeat offenders ranked"
    );

    Ok(Json(ranked))
}

/// Zones ranked by PPE violations.
///
/// GET /api/v1/teams/:slug/high-risk-zones
pub async fn list_high_risk_zones(
    State(state): State<AppState>,
    access: TeamAccess,
    ApiQuery(query): ApiQuery<RiskRankingQuery>,
) -> Result<Json<Vec<ZoneRiskData>>, ApiError> {
    let config = &state.config.compliance;
    let options = ranking_options(&query, config.zone_min_violations, config)?;
    let days = window_days(&query, config)?;

    let team_id = access.team.id;
    let alerts = alerts_in_window(&state, team_id, days).await?;
    let ranked = rank_zones(&alerts, &options);

    info!(
        team_id,
        alerts = alerts.len(),
        zones = ranked.len(),
        min_violations = options.min_violations,
        "High-risk zones ranked"
    );

    Ok(Json(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{RiskSortKey, SortOrder};

    #[test]
    fn test_ranking_options_defaults() {
        let config = ComplianceConfig::default();
        let options = ranking_options(&RiskRankingQuery::default(), 10, &config).unwrap();
        assert_eq!(options.min_violations, 10);
        assert_eq!(options.limit, config.default_alert_limit);
        assert_eq!(options.sort_by, RiskSortKey::Violations);
        assert_eq!(options.order, SortOrder::Desc);
    }

    #[test]
    fn test_ranking_options_from_query() {
        let query = RiskRankingQuery {
            min_violations: Some(2),
            limit: Some(5),
            sort_by: Some("lastViolation".to_string()),
            sort_order: Some("ASC".to_string()),
            days: None,
        };
        let options = ranking_options(&query, 10, &ComplianceConfig::default()).unwrap();
        assert_eq!(options.min_violations, 2);
        assert_eq!(options.limit, 5);
        assert_eq!(options.sort_by, RiskSortKey::LastViolation);
        assert_eq!(options.order, SortOrder::Asc);
    }

    #[test]
    fn test_ranking_options_rejects_unknown_sort_key() {
        let query = RiskRankingQuery {
            sort_by: Some("shoeSize".to_string()),
            ..Default::default()
        };
        match ranking_options(&query, 10, &ComplianceConfig::default()) {
            Err(ApiError::Validation(msg)) => assert!(msg.contains("shoeSize")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_sort_values_use_defaults() {
        let query = RiskRankingQuery {
            sort_by: Some(" ".to_string()),
            sort_order: Some(String::new()),
            ..Default::default()
        };
        assert!(ranking_options(&query, 10, &ComplianceConfig::default()).is_ok());
    }

    #[test]
    fn test_window_days() {
        let config = ComplianceConfig::default();
        let mut query = RiskRankingQuery::default();
        assert_eq!(window_days(&query, &config).unwrap(), config.default_window_days);
        query.days = Some(7);
        assert_eq!(window_days(&query, &config).unwrap(), 7);
        query.days = Some(0);
        assert!(window_days(&query, &config).is_err());
    }
}
