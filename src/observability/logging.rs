//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with an env-filter.
///
/// Falls back to `confetch=debug` when `RUST_LOG` is unset. Safe to call
/// more than once per process; later calls are ignored.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confetch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
