use tracing_subscriber::EnvFilter;

const DEFAULT_TRACE_LEVEL: &str = "warn";

/// `RUST_LOG` wins over the configured level
fn create_env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_TRACE_LEVEL)))
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init_tracing(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
