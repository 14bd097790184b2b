// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable lines, for operators at a terminal.
    Text,
}

/// Initializes the global `tracing` subscriber, writing to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Events emitted
/// through the `log` facade are bridged in.
pub fn init_tracing(format: LogFormat) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_log::LogTracer::init()?;
    match format {
        LogFormat::Json => {
            let subscriber = Registry::default().with(filter).with(base.json());
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Text => {
            let subscriber = Registry::default().with(filter).with(base);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
