//! Tracing configuration for test output.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing for tests.
///
/// Safe to call from every test; only the first call installs a subscriber.
/// Uses `RUST_LOG` when set, otherwise `info,tessera=debug` so token
/// rejections show up next to failing assertions.
pub fn init_test_tracing() {
    init_with(|| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tessera=debug"))
    });
}

/// Initialize tracing with a specific filter, ignoring `RUST_LOG`.
pub fn init_test_tracing_with_filter(filter: &str) {
    init_with(|| EnvFilter::new(filter));
}

fn init_with(filter: impl FnOnce() -> EnvFilter) {
    INIT.call_once(|| {
        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .compact(),
            )
            .try_init();
    });
}
