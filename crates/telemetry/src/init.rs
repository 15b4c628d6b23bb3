// Path: crates/telemetry/src/init.rs
use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initializes the global `tracing` subscriber for structured JSON logging.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Records emitted
/// through the `log` facade are bridged into `tracing`.
pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    tracing_log::LogTracer::init().map_err(|e| anyhow!("failed to set `log` bridge: {e}"))?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("failed to set global subscriber: {e}"))?;
    Ok(())
}

/// Installs a human-readable subscriber that writes through the test
/// harness's captured output. Safe to call from every test; only the first
/// call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
