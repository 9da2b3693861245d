//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level. Logs go to stderr so command
//! output on stdout stays clean.

use cmdreg_core::LoggingConfig;
use tracing_subscriber::EnvFilter;

pub fn init(config: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}
