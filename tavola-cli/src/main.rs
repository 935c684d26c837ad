//! Tavola command-line client

mod cli;
mod commands;
mod logger;
mod output;

use clap::Parser;
use tavola_client::{ClientConfig, TavolaClient};

use cli::Cli;
use commands::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(cli.json_logs, cli.verbose)?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    tracing::debug!(base_url = %config.base_url, data_dir = ?config.data_dir, "client configured");

    let ctx = Context {
        client: TavolaClient::network(config)?,
        currency: cli.currency,
    };

    if let Err(e) = commands::run(cli.command, &ctx).await {
        tracing::debug!(error = ?e, "command failed");
        return Err(e);
    }
    Ok(())
}
