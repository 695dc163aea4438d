//! Canvas metadata embedded in saved snapshots.

use serde::{Deserialize, Serialize};

/// The `meta` block injected into every saved `canvas.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanvasMeta {
    /// Stable identifier, assigned on first save and carried forward
    pub canvas_id: String,
    /// The user-chosen canvas name (also the directory name)
    pub name: String,
    /// RFC 3339 timestamp of the last save
    pub updated_at: String,
}

/// The identity of the canvas a client is currently working on.
///
/// Threaded explicitly through save/open calls so a repeated save
/// updates the existing record instead of creating a new one. This is a
/// plain value the caller owns, not shared state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanvasIdentity {
    pub canvas_id: String,
    pub name: String,
}
