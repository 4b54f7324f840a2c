//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use persistence::db::ping;
use persistence::metrics::{record_pool_metrics, PoolStats};
use serde::Serialize;

use crate::app::AppState;

/// Probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Probe {
    Healthy,
    Unhealthy,
    Alive,
    Ready,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: Probe,
    pub version: String,
    pub database: DatabaseHealth,
    pub response_cache: CacheHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
    pub pool: PoolStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheHealth {
    pub enabled: bool,
    pub entries: usize,
}

/// Body of the liveness and readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: Probe,
}

/// Database, pool and cache state. 503 with the same body when the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let latency = match ping(&state.pool).await {
        Ok(elapsed) => Some(elapsed.as_millis() as u64),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            None
        }
    };
    let connected = latency.is_some();

    let response = HealthResponse {
        status: if connected { Probe::Healthy } else { Probe::Unhealthy },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            connected,
            latency_ms: latency,
            pool: record_pool_metrics(&state.pool),
        },
        response_cache: CacheHealth {
            enabled: state.response_cache.is_some(),
            entries: state.response_cache.as_ref().map_or(0, |c| c.len()),
        },
    };

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: Probe::Alive,
    })
}

/// 200 once the database answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    match ping(&state.pool).await {
        Ok(_) => Ok(Json(StatusResponse {
            status: Probe::Ready,
        })),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
