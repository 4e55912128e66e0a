//! Tracing bootstrap.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "SALES_DASHBOARD_LOG";

/// Initialize tracing with the SALES_DASHBOARD_LOG environment variable.
///
/// Defaults to "info" level if SALES_DASHBOARD_LOG is not set. Logs go to
/// stderr so the terminal surface keeps stdout to itself.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
