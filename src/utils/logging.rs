use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "LEADSYNC_LOG";

pub fn resolve_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }

    if let Ok(level) = std::env::var(LOG_ENV_VAR) {
        if let Ok(filter) = EnvFilter::try_new(&level) {
            return filter;
        }
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init_logging(verbose: bool) -> bool {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
