use domain::models::RiskThresholds;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub compliance: ComplianceConfig,
    #[serde(default)]
    pub trends: TrendsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Include internal error detail in 500 responses. Never enable in production.
    #[serde(default)]
    pub expose_internal_errors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn pool_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Short-lived response cache for repeated GET requests.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached response stays fresh. 0 disables the cache.
    #[serde(default = "default_response_ttl")]
    pub response_ttl_secs: u64,

    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            response_ttl_secs: default_response_ttl(),
            max_entries: default_cache_max_entries(),
        }
    }
}

/// Aggregation windows, ranking thresholds and list limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceConfig {
    /// Upper bound on records loaded for one computation.
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Look-back window when a request names none.
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,

    #[serde(default = "default_offender_min_violations")]
    pub offender_min_violations: u64,

    #[serde(default = "default_zone_min_violations")]
    pub zone_min_violations: u64,

    #[serde(default = "default_risk_high_threshold")]
    pub risk_high_threshold: u64,

    #[serde(default = "default_risk_medium_threshold")]
    pub risk_medium_threshold: u64,

    #[serde(default = "default_alert_limit")]
    pub default_alert_limit: usize,

    #[serde(default = "default_max_alert_limit")]
    pub max_alert_limit: usize,
}

impl ComplianceConfig {
    pub fn risk_thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            high: self.risk_high_threshold,
            medium: self.risk_medium_threshold,
        }
    }
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            default_window_days: default_window_days(),
            offender_min_violations: default_offender_min_violations(),
            zone_min_violations: default_zone_min_violations(),
            risk_high_threshold: default_risk_high_threshold(),
            risk_medium_threshold: default_risk_medium_threshold(),
            default_alert_limit: default_alert_limit(),
            max_alert_limit: default_max_alert_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendsConfig {
    #[serde(default = "default_weekly_buckets")]
    pub weekly_buckets: usize,

    #[serde(default = "default_monthly_buckets")]
    pub monthly_buckets: usize,

    /// Fill empty buckets with sample values flagged `synthetic`. Demo installs only.
    #[serde(default)]
    pub demo_mode: bool,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            weekly_buckets: default_weekly_buckets(),
            monthly_buckets: default_monthly_buckets(),
            demo_mode: false,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_response_ttl() -> u64 {
    5
}
fn default_cache_max_entries() -> usize {
    1000
}
fn default_max_records() -> usize {
    5000
}
fn default_window_days() -> i64 {
    30
}
fn default_offender_min_violations() -> u64 {
    10
}
fn default_zone_min_violations() -> u64 {
    100
}
fn default_risk_high_threshold() -> u64 {
    20
}
fn default_risk_medium_threshold() -> u64 {
    15
}
fn default_alert_limit() -> usize {
    50
}
fn default_max_alert_limit() -> usize {
    500
}
fn default_weekly_buckets() -> usize {
    8
}
fn default_monthly_buckets() -> usize {
    6
}

/// A configuration value that cannot be served with.
#[derive(Debug, thiserror::Error)]
#[error("{key}: {reason}")]
pub struct ConfigValidationError {
    pub key: &'static str,
    pub reason: String,
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError {
        key,
        reason: reason.into(),
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.port == 0 {
            return Err(invalid("server.port", "must not be 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "must be positive"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.url.is_empty() {
            return Err(invalid("database.url", "set SG__DATABASE__URL"));
        }
        if self.min_connections > self.max_connections {
            return Err(invalid(
                "database.min_connections",
                "cannot exceed max_connections",
            ));
        }
        Ok(())
    }
}

impl ComplianceConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_records == 0 {
            return Err(invalid("compliance.max_records", "must be positive"));
        }
        if self.default_window_days <= 0 {
            return Err(invalid("compliance.default_window_days", "must be positive"));
        }
        if self.risk_medium_threshold > self.risk_high_threshold {
            return Err(invalid(
                "compliance.risk_medium_threshold",
                "cannot exceed risk_high_threshold",
            ));
        }
        if !(1..=self.max_alert_limit).contains(&self.default_alert_limit) {
            return Err(invalid(
                "compliance.default_alert_limit",
                format!("must be between 1 and {}", self.max_alert_limit),
            ));
        }
        Ok(())
    }
}

impl TrendsConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.weekly_buckets == 0 || self.monthly_buckets == 0 {
            return Err(invalid("trends", "bucket counts must be positive"));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with SG__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SG")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("security.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Built entirely from embedded defaults and overrides so tests do not
    /// depend on the working directory.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30
            expose_internal_errors = false

            [database]
            url = ""
            max_connections = 20
            min_connections = 5
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [cache]
            response_ttl_secs = 5
            max_entries = 1000

            [compliance]
            max_records = 5000
            default_window_days = 30
            offender_min_violations = 10
            zone_min_violations = 100
            risk_high_threshold = 20
            risk_medium_threshold = 15
            default_alert_limit = 50
            max_alert_limit = 500

            [trends]
            weekly_buckets = 8
            monthly_buckets = 6
            demo_mode = false
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        // Not validated, so tests can build partial configs.
        builder.build()?.try_deserialize()
    }

    /// Checks every section; the first offending key wins.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.compliance.validate()?;
        self.trends.validate()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
