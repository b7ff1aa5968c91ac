//! Subscriber installation. Filter from `BHASHA_LOG`, JSON lines to stderr.

pub mod spans;

use bhasha_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "BHASHA_LOG";

/// Install a JSON subscriber filtered by `BHASHA_LOG`, falling back to
/// `info`. Returns false if a global subscriber was already set.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    install(filter, true)
}

/// Install a JSON subscriber with an explicit filter directive.
pub fn init_tracing_with_filter(directive: &str) -> bool {
    install(EnvFilter::new(directive), true)
}

/// Install from config. `BHASHA_LOG` still wins over `log_level` when set.
pub fn init_from_config(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    install(filter, config.json)
}

fn install(filter: EnvFilter, json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}
