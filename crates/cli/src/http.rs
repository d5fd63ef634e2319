//! HTTP routes for the gallery.

use crate::render;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gallery_core::gallery;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use storage::{CommentStore, StorageError};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub struct AppState {
    pub photos_dir: PathBuf,
    pub store: Arc<dyn CommentStore>,
}

impl AppState {
    pub fn new(photos_dir: impl Into<PathBuf>, store: Arc<dyn CommentStore>) -> Self {
        Self {
            photos_dir: photos_dir.into(),
            store,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    // ServeDir refuses `..` segments, which keeps reads inside the photo dir.
    let photos = ServeDir::new(&state.photos_dir);
    Router::new()
        .route("/", get(gallery_root))
        .route("/month/{month}", get(month_view))
        .route("/comment", post(upsert_comment))
        .nest_service("/photos", photos)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves once `signal` fires. If the signal cannot be installed the
/// server keeps running instead of stopping straight away.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("cannot listen for shutdown signal, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

fn page_error(err: anyhow::Error) -> Response {
    error!("render failed: {:#}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("internal error: {err:#}"),
    )
        .into_response()
}

async fn gallery_root(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, None).await
}

async fn month_view(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
) -> Response {
    render_page(&state, Some(&month)).await
}

async fn render_page(state: &AppState, month: Option<&str>) -> Response {
    match gallery::build_view(state.photos_dir.clone(), state.store.as_ref(), month).await {
        Ok(view) => Html(render::render_gallery(&view)).into_response(),
        Err(e) => page_error(e),
    }
}

// Fields are read independently so a bad `text` never hides a good `date`.
#[derive(Debug, Default, Deserialize)]
struct CommentRequest {
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
}

impl CommentRequest {
    /// Empty bodies count as `{}`; anything else must be a JSON object.
    fn parse(body: &[u8]) -> Result<Self, &'static str> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        // Derived struct impls also accept arrays, so check the shape first.
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|_| "invalid JSON body")
            }
            _ => Err("invalid JSON body"),
        }
    }

    /// `(date, text)`; a null or absent `text` is empty.
    fn fields(self) -> Result<(String, String), &'static str> {
        let date = match self.date {
            None => String::new(),
            Some(Value::String(d)) => d,
            Some(_) => return Err("date must be a string"),
        };
        let text = match self.text {
            None => String::new(),
            Some(Value::String(t)) => t,
            Some(_) => return Err("text must be a string"),
        };
        Ok((date, text))
    }
}

#[derive(Debug, Serialize)]
struct CommentResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CommentResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

// Takes raw bytes so a missing content type is not an extractor rejection.
async fn upsert_comment(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<CommentResponse>) {
    let (date, text) = match CommentRequest::parse(&body).and_then(CommentRequest::fields) {
        Ok(fields) => fields,
        Err(reason) => {
            warn!("comment rejected: {}", reason);
            return (
                StatusCode::BAD_REQUEST,
                Json(CommentResponse::failed(reason)),
            );
        }
    };
    match state.store.upsert(&date, &text).await {
        Ok(()) => {
            info!("saved comment for {}", date);
            (StatusCode::OK, Json(CommentResponse::ok()))
        }
        Err(StorageError::MissingDate) => {
            warn!("comment rejected: missing date");
            (
                StatusCode::BAD_REQUEST,
                Json(CommentResponse::failed("missing date")),
            )
        }
        Err(e) => {
            error!("comment save failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CommentResponse::failed(e.to_string())),
            )
        }
    }
}
