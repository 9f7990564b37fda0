//! Observability middleware.
//!
//! Tracing subscriber setup for the API binary.

use tracing_subscriber::EnvFilter;

/// Selects structured JSON log lines when set to `json`.
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` controls the filter (default `info`); output goes to stderr.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed by tests or an embedding process
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.with_ansi(false).try_init()
    };
}
