use tracing_subscriber::EnvFilter;

/// Set up the tracing subscriber and route `log` records through it.
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let _ = tracing_log::LogTracer::init();

    let filter = if verbose {
        EnvFilter::new("panview=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();

    tracing::debug!(verbose, "logging initialized");
}
