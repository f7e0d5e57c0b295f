//! Tracing bootstrap for hosts embedding the engine.
//!
//! The engine itself only emits `tracing` events and `metrics` counters; the
//! host decides where they go. Hosts without their own subscriber can call
//! [`init_tracing`] once at startup.
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install a fmt subscriber filtered by `RUST_LOG` (default `default_filter`).
///
/// Safe to call more than once; only the first call installs anything, and an
/// already-installed global subscriber is left in place.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
