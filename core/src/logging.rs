use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber for client binaries.
/// - Respects `RUST_LOG` if set, falls back to `info`
/// - A subscriber installed earlier is left in place
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}
