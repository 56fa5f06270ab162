//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Sets up logging of events reported by the resolver.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to only see subscription changes:
///   RUST_LOG=destination::resolver=DEBUG
///
/// Calling this more than once, or after another subscriber has been
/// installed, has no effect.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}
