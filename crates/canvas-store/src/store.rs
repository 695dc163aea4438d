//! Save / list / open against the data-root directory.

use crate::error::StoreError;
use crate::meta::{CanvasIdentity, CanvasMeta};
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

const SNAPSHOT_FILE: &str = "canvas.json";
const MARKDOWN_FILE: &str = "content.md";

/// Input to [`CanvasStore::save`].
#[derive(Debug, Clone)]
pub struct SaveRequest {
    /// User-chosen canvas name, doubles as the directory name
    pub name: String,
    /// Opaque snapshot from the canvas library
    pub snapshot: Value,
    /// Derived Markdown summary, written alongside the snapshot
    pub markdown: String,
    /// Identifier from a previous save of the same logical canvas
    pub existing_id: Option<String>,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCanvas {
    pub canvas_id: String,
    /// The canvas directory that was written
    pub path: PathBuf,
}

/// Result of a successful open.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedCanvas {
    /// The snapshot as saved, meta block included
    pub snapshot: Value,
    /// Identifier from the meta block, if one was recorded
    pub canvas_id: Option<String>,
    /// Name from the meta block, falling back to the requested name
    pub name: String,
}

impl OpenedCanvas {
    /// Identity a client threads into later saves so the re-save
    /// updates this record instead of minting a new id.
    pub fn identity(&self) -> Option<CanvasIdentity> {
        self.canvas_id.as_ref().map(|id| CanvasIdentity {
            canvas_id: id.clone(),
            name: self.name.clone(),
        })
    }
}

/// Filesystem store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct CanvasStore {
    data_dir: PathBuf,
}

impl CanvasStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Persist a canvas under its name, overwriting any previous save.
    ///
    /// Assigns a fresh id when `existing_id` is absent; otherwise the
    /// id is reused so the record stays the same logical canvas. The
    /// snapshot gets a `meta` block (id, name, timestamp) injected,
    /// replacing any prior one.
    pub fn save(&self, request: SaveRequest) -> Result<SavedCanvas, StoreError> {
        let canvas_dir = self.canvas_dir(&request.name)?;

        let canvas_id = request
            .existing_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let meta = CanvasMeta {
            canvas_id: canvas_id.clone(),
            name: request.name.clone(),
            updated_at: Utc::now().to_rfc3339(),
        };

        let mut snapshot = request.snapshot;
        if !snapshot.is_object() {
            // Wrap non-object snapshots so meta has somewhere to live
            snapshot = serde_json::json!({ "document": snapshot });
        }
        snapshot["meta"] = serde_json::to_value(&meta)
            .map_err(|e| StoreError::Corrupt {
                path: canvas_dir.join(SNAPSHOT_FILE),
                source: e,
            })?;

        fs::create_dir_all(&canvas_dir).map_err(|e| StoreError::io(&canvas_dir, e))?;

        let snapshot_path = canvas_dir.join(SNAPSHOT_FILE);
        let pretty = serde_json::to_string_pretty(&snapshot).map_err(|e| StoreError::Corrupt {
            path: snapshot_path.clone(),
            source: e,
        })?;
        fs::write(&snapshot_path, pretty).map_err(|e| StoreError::io(&snapshot_path, e))?;

        let markdown_path = canvas_dir.join(MARKDOWN_FILE);
        fs::write(&markdown_path, &request.markdown)
            .map_err(|e| StoreError::io(&markdown_path, e))?;

        info!("Saved canvas {:?} ({})", request.name, canvas_id);

        Ok(SavedCanvas {
            canvas_id,
            path: canvas_dir,
        })
    }

    /// Names of all stored canvases, sorted.
    ///
    /// A missing data root is an empty store, not an error. Hidden
    /// entries and plain files are skipped.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let entries =
            fs::read_dir(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.data_dir, e))?;
            let file_type = entry.file_type().map_err(|e| StoreError::io(entry.path(), e))?;
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Read a stored canvas back.
    ///
    /// Distinguishes a missing canvas (`NotFound`) from one whose
    /// snapshot file no longer parses (`Corrupt`).
    pub fn open(&self, name: &str) -> Result<OpenedCanvas, StoreError> {
        let snapshot_path = self.canvas_dir(name)?.join(SNAPSHOT_FILE);

        let raw = match fs::read_to_string(&snapshot_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Canvas {:?} not found at {}", name, snapshot_path.display());
                return Err(StoreError::NotFound {
                    name: name.to_string(),
                });
            }
            Err(e) => return Err(StoreError::io(&snapshot_path, e)),
        };

        let snapshot: Value = serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: snapshot_path,
            source: e,
        })?;

        let meta = snapshot
            .get("meta")
            .and_then(|m| serde_json::from_value::<CanvasMeta>(m.clone()).ok());

        Ok(OpenedCanvas {
            canvas_id: meta.as_ref().map(|m| m.canvas_id.clone()),
            name: meta
                .map(|m| m.name)
                .unwrap_or_else(|| name.to_string()),
            snapshot,
        })
    }

    /// Resolve the directory for a canvas name, rejecting names that
    /// would escape the data root.
    fn canvas_dir(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StoreError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.data_dir.join(name))
    }
}
