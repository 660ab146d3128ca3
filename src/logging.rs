//! Logging setup
//!
//! `RUST_LOG` wins when set. Otherwise `--debug` selects `debug` for this
//! crate and everything else stays at `warn`. Logs go to stderr so stdout only
//! carries the run summary.

use tracing_subscriber::EnvFilter;

fn default_directive(debug: bool) -> &'static str {
    if debug {
        "warn,vendorize=debug"
    } else {
        "warn,vendorize=info"
    }
}

/// Build the filter for a run
pub fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(debug)))
}

/// Install the global subscriber; a second call is a no-op
pub fn init(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_target(debug)
        .without_time()
        .try_init();
}
