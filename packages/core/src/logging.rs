use tracing_subscriber::{fmt, EnvFilter};

/// Bot internals log at debug, dependencies at info.
const DEFAULT_FILTER: &str = "info,homework_bot=debug";

/// Initialize structured logging (timestamp, level, message) on stderr.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. Call once from `main`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    tracing::debug!("Logging initialized");
}
