use crate::types::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Explicit level wins, then `RUST_LOG`, then `warn`.
fn build_filter(level: Option<LogLevel>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Install the stderr subscriber. Stdout carries only the report.
pub fn init(level: Option<LogLevel>) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(build_filter(level))
        .try_init();
}
