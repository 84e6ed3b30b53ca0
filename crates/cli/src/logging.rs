//! Diagnostic logging to stderr.
//!
//! The filter comes from `QUIRE_LOG` when set, otherwise from the
//! `[logging] filter` config value. `--verbose` forces `debug`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV: &str = "QUIRE_LOG";

pub(crate) fn filter_for(configured: &str, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub(crate) fn init_logging(configured: &str, verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter_for(configured, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
