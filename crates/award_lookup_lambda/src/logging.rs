use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the JSON log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_current_span(false)
                .with_target(false),
        )
        .init();
}
