//! Tracing setup for tests.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str =
    "joybridge=debug,joybridge_settings=debug,joybridge_joyport=debug,snes_pad_protocol=debug";

/// Route `tracing` output through the test harness's captured writer.
///
/// `RUST_LOG` overrides the default filter. Returns `false` when another
/// test in the same binary already installed a subscriber.
pub fn init_test_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .is_ok()
}
