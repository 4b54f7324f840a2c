//! Database metrics collection.

use metrics::{gauge, histogram};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

/// Records how long a named query took.
pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name.to_string()
    )
    .record(duration_secs);
}

/// Connection pool occupancy at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: u32,
    pub active: u32,
}

impl PoolStats {
    pub fn new(size: u32, idle: u32) -> Self {
        Self {
            size,
            idle,
            active: size.saturating_sub(idle),
        }
    }
}

/// Publishes pool gauges and returns the numbers it published.
pub fn record_pool_metrics(pool: &PgPool) -> PoolStats {
    let stats = PoolStats::new(pool.size(), pool.num_idle() as u32);

    gauge!("database_connections_active").set(stats.active as f64);
    gauge!("database_connections_idle").set(stats.idle as f64);
    gauge!("database_connections_total").set(stats.size as f64);
    stats
}

/// Times one repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_team_by_slug");
/// let result = sqlx::query_as::<_, TeamEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        record_query_duration(self.query_name, self.start.elapsed().as_secs_f64());
    }
}
