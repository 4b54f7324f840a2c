use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::set_expose_internal_errors;
use crate::middleware::response_cache::build_response_cache;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_auth, response_cache_middleware, trace_id,
    ResponseCache,
};
use crate::routes::{alerts, compliance, health, risk, trends};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub response_cache: Option<Arc<ResponseCache>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);
    set_expose_internal_errors(config.server.expose_internal_errors);

    let response_cache =
        build_response_cache(config.cache.response_ttl_secs, config.cache.max_entries)
            .map(Arc::new);

    let state = AppState {
        pool,
        config: config.clone(),
        response_cache,
    };

    let cors = if config.security.cors_origins.is_empty() {
        // Development: any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Team-scoped routes (require API key authentication).
    // Auth is the outermost route layer so the cache can key on the API key.
    let team_routes = Router::new()
        .route(
            "/api/v1/teams/:slug/compliance-data",
            get(compliance::get_compliance_data),
        )
        .route(
            "/api/v1/teams/:slug/compliance-statuses",
            get(compliance::list_compliance_statuses),
        )
        .route(
            "/api/v1/teams/:slug/alerts/all-alerts",
            get(alerts::list_all_alerts),
        )
        .route(
            "/api/v1/teams/:slug/alerts/:id/status",
            put(alerts::update_alert_status),
        )
        .route(
            "/api/v1/teams/:slug/alerts/:id/comments",
            post(alerts::create_alert_comment),
        )
        .route(
            "/api/v1/teams/:slug/repeat-offenders",
            get(risk::list_repeat_offenders),
        )
        .route(
            "/api/v1/teams/:slug/high-risk-zones",
            get(risk::list_high_risk_zones),
        )
        .route("/api/v1/teams/:slug/trends", get(trends::get_trends))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            response_cache_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(team_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
