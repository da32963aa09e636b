use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Environment variable holding filter directives, e.g. `debug` or `hexsweeper_core=trace`.
pub const LOG_ENV: &str = "HEXSWEEPER_LOG";

/// Filter from [`LOG_ENV`], falling back to `default` for anything it does not cover.
fn env_filter(default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy()
}

/// Installs a stderr subscriber. `log` records from the engine are forwarded to it.
pub fn init_logging(default: LevelFilter) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing logger: {err}"))
}
