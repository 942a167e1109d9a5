//! Tracing subscriber setup.

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use archivum::config::{LogFormat, LoggingConfig};

/// Installs the global subscriber and routes `log` records from the library into it.
///
/// `RUST_LOG` overrides the configured level; each `-v` raises the default
/// to debug, then trace.
pub fn init(config: &LoggingConfig, format: LogFormat, verbose: u8) -> anyhow::Result<()> {
    tracing_log::LogTracer::init()
        .context("failed to install log bridge")?;

    let default_directive = match verbose {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_directive))
        .with_context(|| format!("invalid log level '{}'", default_directive))?;

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            tracing::subscriber::set_global_default(registry.with(layer))
        }
        LogFormat::Pretty => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing::subscriber::set_global_default(registry.with(layer))
        }
    }
    .context("failed to install tracing subscriber")?;

    Ok(())
}
