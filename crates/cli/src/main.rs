// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Sentinel CLI
//!
//! Operator tooling around a deployment: key and hyperplane provisioning,
//! offline signing, and read-back of stored evidence.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sentinel_telemetry::init::{init_tracing, LogFormat};

mod commands;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "sentinel",
    version,
    about = "Provisioning and inspection tools for sentinel deployments."
)]
struct Cli {
    /// Log line format on stderr.
    #[clap(long, value_enum, global = true, default_value = "text")]
    log_format: LogFormatArg,

    /// Record metrics while the command runs and dump them to stderr afterwards.
    #[clap(long, global = true)]
    metrics: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Json,
    Text,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Text => LogFormat::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the symmetric evidence key.
    Keys(keys::KeysArgs),

    /// Generate and inspect hyperplane files.
    Planes(planes::PlanesArgs),

    /// Quantize and sign an embedding against a deployment's hyperplanes.
    Sign(sign::SignArgs),

    /// Read back stored evidence and mapping records.
    Evidence(evidence::EvidenceArgs),

    /// Generate deployment configuration.
    Config(config::ConfigCmdArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format.into())?;
    if cli.metrics {
        install_metrics()?;
    }

    let result = match cli.command {
        Commands::Keys(args) => keys::run(args),
        Commands::Planes(args) => planes::run(args),
        Commands::Sign(args) => sign::run(args),
        Commands::Evidence(args) => evidence::run(args).await,
        Commands::Config(args) => config::run(args),
    };

    if cli.metrics {
        dump_metrics();
    }
    result
}

/// Points the pipeline, error and store sinks at Prometheus.
fn install_metrics() -> Result<()> {
    let sink = sentinel_telemetry::prometheus::install()?;
    if sentinel_storage::metrics::SINK.set(sink).is_err() {
        tracing::warn!(target: "cli", "store metrics sink was already installed");
    }
    Ok(())
}

/// Never fails: the command's own result takes precedence.
fn dump_metrics() {
    match sentinel_telemetry::prometheus::render() {
        Ok(text) => eprint!("{}", text),
        Err(e) => tracing::warn!(target: "cli", error = %e, "failed to render metrics"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_subcommands() {
        let cli = Cli::try_parse_from([
            "sentinel",
            "planes",
            "generate",
            "--dimension",
            "512",
            "--bits",
            "64",
            "--seed",
            "42",
            "--out",
            "planes.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Planes(_)));

        let cli = Cli::try_parse_from([
            "sentinel",
            "--log-format",
            "json",
            "evidence",
            "open",
            "--config",
            "sentinel.toml",
            "abcd",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(matches!(cli.command, Commands::Evidence(_)));
    }

    #[test]
    fn metrics_install_once_and_feed_the_store_sink() {
        install_metrics().unwrap();
        assert!(sentinel_storage::metrics::SINK.get().is_some());
        assert!(install_metrics().is_err());
        dump_metrics();
    }

    #[test]
    fn sign_requires_a_config() {
        assert!(Cli::try_parse_from(["sentinel", "sign", "embedding.json"]).is_err());
    }
}
