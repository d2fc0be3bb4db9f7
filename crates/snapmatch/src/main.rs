mod cli;
mod commands;
mod compare;
mod config;
mod region;
mod report;
mod source;

use clap::Parser;
use config::ResolvedConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snapmatch=info,snapmatch_diff=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Init { threshold, force } => {
            commands::init(threshold, force)?;
        }
        cli::Command::Compare {
            reference,
            current,
            output,
            json,
            diff,
        } => {
            let config = ResolvedConfig::new(diff.overrides(None))?;
            let code = commands::compare(config, reference, current, output, json).await?;
            std::process::exit(code);
        }
        cli::Command::Watch {
            reference,
            current,
            interval_ms,
            polls,
            diff,
        } => {
            let config = ResolvedConfig::new(diff.overrides(interval_ms))?;
            let code = commands::watch(config, reference, current, polls).await?;
            std::process::exit(code);
        }
    }

    Ok(())
}
