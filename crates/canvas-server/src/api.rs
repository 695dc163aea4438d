//! Request handlers for the save / list / open API.
//!
//! Wire shapes follow the front end's expectations: camelCase fields,
//! a `success` boolean, and `logseqPath` set to null whenever the
//! Logseq mirror was skipped or failed. Sync problems never fail a
//! save; they only null out that field.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use canvas_export::{render_markdown, shapes_from_snapshot};
use canvas_store::{SaveRequest, StoreError};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/save", post(save))
        .route("/api/list", get(list))
        .route("/api/open", get(open))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SaveBody {
    pub name: String,
    /// Opaque snapshot from the canvas library
    pub json: Value,
    /// Markdown from the front end; derived server-side when absent
    pub markdown: Option<String>,
    #[serde(rename = "canvasId")]
    pub canvas_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "canvasId", skip_serializing_if = "Option::is_none")]
    pub canvas_id: Option<String>,
    #[serde(rename = "logseqPath")]
    pub logseq_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            canvas_id: None,
            logseq_path: None,
            error: Some(error.into()),
        }
    }
}

/// `POST /api/save`
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveBody>,
) -> (StatusCode, Json<SaveResponse>) {
    let markdown = body.markdown.unwrap_or_else(|| {
        let shapes = shapes_from_snapshot(&body.json);
        let saved_at = Local::now().format("%Y-%m-%d %H:%M").to_string();
        render_markdown(&shapes, &body.name, &saved_at)
    });

    let saved = state.store.save(SaveRequest {
        name: body.name.clone(),
        snapshot: body.json,
        markdown: markdown.clone(),
        existing_id: body.canvas_id,
    });

    let saved = match saved {
        Ok(saved) => saved,
        Err(e @ StoreError::InvalidName { .. }) => {
            return (StatusCode::BAD_REQUEST, Json(SaveResponse::failure(e.to_string())));
        }
        Err(e) => {
            error!("Save failed for {:?}: {}", body.name, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveResponse::failure(e.to_string())),
            );
        }
    };

    // Best-effort mirror; a None path is the only visible effect of failure
    let logseq_path = state
        .logseq
        .as_ref()
        .and_then(|sync| sync.sync(&body.name, &saved.canvas_id, &markdown))
        .map(|p| p.to_string_lossy().to_string());

    (
        StatusCode::OK,
        Json(SaveResponse {
            success: true,
            path: Some(saved.path.to_string_lossy().to_string()),
            canvas_id: Some(saved.canvas_id),
            logseq_path,
            error: None,
        }),
    )
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ListResponse {
    pub canvases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/list`
pub async fn list(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ListResponse>) {
    match state.store.list() {
        Ok(canvases) => (
            StatusCode::OK,
            Json(ListResponse {
                canvases,
                error: None,
            }),
        ),
        Err(e) => {
            error!("List failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ListResponse {
                    canvases: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OpenResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpenResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// `GET /api/open?name=...`
pub async fn open(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OpenParams>,
) -> (StatusCode, Json<OpenResponse>) {
    let Some(name) = params.name else {
        return (
            StatusCode::BAD_REQUEST,
            Json(OpenResponse::failure("missing name parameter")),
        );
    };

    match state.store.open(&name) {
        Ok(opened) => (
            StatusCode::OK,
            Json(OpenResponse {
                success: true,
                data: Some(opened.snapshot),
                error: None,
            }),
        ),
        Err(e @ StoreError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(OpenResponse::failure(e.to_string())),
        ),
        Err(e @ StoreError::InvalidName { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(OpenResponse::failure(e.to_string())),
        ),
        Err(e) => {
            error!("Open failed for {:?}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(OpenResponse::failure(e.to_string())),
            )
        }
    }
}
