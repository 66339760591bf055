use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing output. Default filter keeps dependencies at
/// warn and glowd itself at info, so request traces from tower-http
/// only appear when asked for via RUST_LOG. GLOWD_LOG_JSON=1 switches
/// to JSON lines for log shippers.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,glowd=info"));
    let use_json = std::env::var("GLOWD_LOG_JSON")
        .map(|value| value == "1")
        .unwrap_or(false);

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .pretty()
            .with_writer(std::io::stderr)
            .try_init();
    }
}
