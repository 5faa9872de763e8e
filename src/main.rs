//! Oratype
//!
//! Validate, format and compare values of engine-compatible scalar types.
//!
//! Logging goes to stderr so results on stdout stay machine-readable.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    let cli = oratype_cli::Cli::from_env();

    // `--log-level` wins over RUST_LOG
    let filter = match cli.log_level.as_deref() {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = oratype_core::VERSION,
        cli = oratype_cli::VERSION,
        "starting"
    );

    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    oratype_cli::run(cli, &mut stdout.lock(), color)
}
