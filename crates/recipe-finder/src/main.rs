mod config;
mod error;
mod server;
mod session;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_core::catalog::MealDbClient;
use recipe_core::engine::RankingEngine;
use recipe_core::translate::GoogleTranslator;

use config::Config;
use error::AppError;
use server::RecipeFinderServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting recipe-finder MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_url = %config.catalog.base_url,
        translate_url = %config.translator.base_url,
        user_locale = %config.engine.user_locale,
        catalog_locale = %config.engine.catalog_locale,
        max_candidates = config.engine.max_candidates,
        concurrency = config.engine.concurrency,
        "configuration loaded"
    );

    let server = build_server(&config)?;

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.with_fresh_session();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}

fn build_server(config: &Config) -> Result<RecipeFinderServer, AppError> {
    let catalog = Arc::new(MealDbClient::new(config.catalog.clone())?);
    let translator = Arc::new(GoogleTranslator::new(config.translator.clone())?);
    if config.translator.max_rps > 0 {
        info!(max_rps = config.translator.max_rps, "translation throttled");
    }
    let engine = RankingEngine::new(catalog, translator, config.engine.clone());
    Ok(RecipeFinderServer::new(engine))
}
