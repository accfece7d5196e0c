use tracing_subscriber::EnvFilter;

/// Initialize tracing for test binaries.
///
/// Output goes through the test writer so it is captured per test. `RUST_LOG`
/// overrides the default `warn` level; `RUST_LOG=mock_recorder=trace` shows
/// every registration and matched call.
///
/// Safe to call from every test: only the first call installs a subscriber.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
