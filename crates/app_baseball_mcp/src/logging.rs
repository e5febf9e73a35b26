//! Tracing setup shared by the stdio and HTTP binaries.

pub const LOG_LEVEL_VAR: &str = "APP_BASEBALL_LOG_LEVEL";

/// Filter from `APP_BASEBALL_LOG_LEVEL`, else `RUST_LOG`, else `info`.
pub fn log_filter_from<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get(LOG_LEVEL_VAR)
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}

/// Append per-target overrides to keep rmcp internals quiet by default.
pub fn env_filter(log_env: &str) -> tracing_subscriber::EnvFilter {
    let combined_filter = format!("{},rmcp=warn,serve_inner=warn", log_env);
    tracing_subscriber::EnvFilter::try_new(combined_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,rmcp=warn,serve_inner=warn"))
}

/// Compact, ANSI-free logs on stderr. Returns the filter in use.
///
/// stdout stays free for the stdio MCP transport.
pub fn init_tracing() -> String {
    let log_env = log_filter_from(|k| std::env::var(k).ok());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter(&log_env))
        .init();
    log_env
}
