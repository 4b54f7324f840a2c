//! Logging initialization and configuration.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes the global subscriber from configuration.
///
/// `RUST_LOG` takes precedence over `logging.level`. Any format other than
/// `json` falls back to human-readable output. Calling this twice is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if is_json(&config.format) {
        let json_layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true);
        subscriber.with(json_layer).try_init()
    } else {
        let pretty_layer = fmt::layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true);
        subscriber.with(pretty_layer).try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

fn is_json(format: &str) -> bool {
    format.trim().eq_ignore_ascii_case("json")
}
