//! canvas-server: local persistence API for the ai-canvas whiteboard.
//!
//! Serves save/list/open on loopback HTTP for the browser front end and
//! mirrors saved canvases into Logseq when a pages directory is
//! configured.

use anyhow::Result;
use canvas_server::config::{Args, Config};
use canvas_server::{api, AppState};
use canvas_store::CanvasStore;
use clap::Parser;
use logseq_sync::LogseqSync;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::resolve(Args::parse());

    let default_filter = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("Data directory: {}", config.data_dir.display());

    let logseq = match &config.logseq_pages_dir {
        Some(dir) => {
            if !dir.is_dir() {
                // Still configured: the graph may appear later
                warn!("Logseq pages dir {} does not exist yet", dir.display());
            }
            info!("Logseq sync enabled: {}", dir.display());
            Some(LogseqSync::new(dir))
        }
        None => {
            info!("Logseq sync disabled (no pages directory configured)");
            None
        }
    };

    let state = Arc::new(AppState {
        store: CanvasStore::new(&config.data_dir),
        logseq,
    });

    let app = api::router(state);

    let listener = TcpListener::bind(&config.listen).await?;
    info!("Listening on http://{}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
