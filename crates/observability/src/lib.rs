//! Tracing/logging initialization shared by invocation hosts.

/// Initialize process-wide logging (JSON lines, `RUST_LOG` filterable).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
