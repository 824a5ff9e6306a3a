use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::commands::LogFormat;

/// Installs the global subscriber. `RUST_LOG` takes precedence over `--log-level`.
pub fn init_logging(level: &str, format: &LogFormat) -> Result<()> {
    let env = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    // stdout carries command output; diagnostics go to stderr
    let base = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => tracing_subscriber::registry().with(env).with(base.json()).try_init()?,
        _ => tracing_subscriber::registry().with(env).with(base.compact()).try_init()?,
    }
    Ok(())
}
