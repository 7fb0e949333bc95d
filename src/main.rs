use anyhow::Context;
use plugin_rank::{JsonFileCatalog, RankingServer, RankingService, config};
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr to avoid interfering with MCP protocol on stdout
    plugin_rank::tracing::init();

    let mut config = config::load()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.catalog = Some(PathBuf::from(path));
    }
    let catalog_path = config.catalog.clone().context(
        "No plugin catalog configured. Pass the JSON export path as the first argument \
         or set `catalog` in the configuration file.",
    )?;

    tracing::info!("Starting plugin-rank MCP server with catalog {}", catalog_path.display());

    let catalog = Arc::new(JsonFileCatalog::new(catalog_path));
    let server = RankingServer::new(RankingService::from_config(catalog, &config));

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
