//! Loopback HTTP API for the canvas front end.
//!
//! Exposes the three store operations (`/api/save`, `/api/list`,
//! `/api/open`) over local HTTP. Save additionally mirrors the derived
//! Markdown into Logseq when that integration is configured.

pub mod api;
pub mod config;

use canvas_store::CanvasStore;
use logseq_sync::LogseqSync;

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: CanvasStore,
    /// Present only when a Logseq pages directory was configured
    pub logseq: Option<LogseqSync>,
}
