use std::io;

use clap::Parser;
use scripts::{
    cli::Cli,
    constants::{CONTRACT_NAME, DEFAULT_LOG_FILTER},
    errors::ScriptError,
    evm::EvmBackend,
    runner::deploy_and_report,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries the deployed address
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let backend = EvmBackend::new(&cli.deploy_config())?;
    deploy_and_report(&backend, CONTRACT_NAME, &mut io::stdout()).await?;

    Ok(())
}
