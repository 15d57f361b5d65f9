use anyhow::Context;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solana_defi_mcp::client::{ShyftClient, SolflareClient};
use solana_defi_mcp::config::{Config, Provider};
use solana_defi_mcp::{server, tools};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let provider = Provider::resolve(std::env::args().nth(1))?;
    info!("Starting Solana DeFi MCP server ({provider:?} provider)...");

    let config = Config::from_env(provider)?;

    match provider {
        Provider::Pools => {
            let api_key = config
                .shyft_api_key
                .as_deref()
                .context("SHYFT_API_KEY must be set")?;
            let client = ShyftClient::new(&config.shyft_url, api_key)?;
            server::run(client, tools::pools::all()).await
        }
        Provider::Tokens => {
            let client = SolflareClient::new(&config.solflare_url)?;
            server::run(client, tools::tokens::all()).await
        }
    }
}
