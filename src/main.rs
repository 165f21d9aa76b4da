use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use static_httpd::config::{Cli, Settings};
use static_httpd::server::Server;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Settings::load(cli)?.validate()?;
    let server = Server::bind(config).await?;
    server.run().await
}
