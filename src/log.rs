//! Logging setup.
//!
//! Log lines go to stderr so stdout carries only command output. `--debug`
//! turns on debug output for this crate; otherwise `RUST_LOG` applies.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Call once at startup.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("wincmdline=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wincmdline=warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
