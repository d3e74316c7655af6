mod cli;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use podcastr::api::state::AppState;
use podcastr::client::ApiClient;
use podcastr::config::Config;
use podcastr::observability;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    observability::init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Server(args) => {
            let address = args.address.unwrap_or(config.server.bind_addr);
            podcastr::api::run(config, address, !args.lazy).await?
        }
        Commands::Build(args) => {
            let out_dir = args.out.unwrap_or_else(|| config.build.out_dir.clone());
            let client = ApiClient::new(&config.api.base_url, &config.api.http_config())?;
            let state = AppState::new(config, Arc::new(client))?;

            let written = state.site.build(&out_dir).await?;
            info!(files = written.len(), out_dir = %out_dir.display(), "Build complete");
        }
    }

    Ok(())
}
