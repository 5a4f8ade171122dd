//! Tracing bootstrap shared by the binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber.
///
/// The filter comes from `LOG_LEVEL`, then `RUST_LOG`, then `default`
/// (e.g. `"info"` or `"asset_sync=debug,info"`). A second call is a no-op.
pub fn init_tracing(default: &str) {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
