use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Default directives when `RUST_LOG` is absent: the configured level for
/// the advisor itself, with the outbound HTTP stack held at `warn` so a
/// `debug` run is not drowned out by gateway retrieval chatter.
fn fallback_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let directives = format!("{},hyper=warn,reqwest=warn", config.log_level);
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: directives,
        source,
    })
}

/// Installs the global subscriber. Development keeps targets and color for
/// local debugging; test and production emit plain compact lines.
pub fn init(config: &TelemetryConfig, environment: AppEnvironment) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => fallback_filter(config)?,
    };

    let development = environment == AppEnvironment::Development;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(development)
        .with_ansi(development)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
