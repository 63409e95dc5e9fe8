//! HTTP handlers (DTO boundary).

pub mod data_transfer;
pub mod item;
pub mod pages;

use crate::error::AppError;
use crate::infra::DbPool;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{DefaultBodyLimit, FromRequest, FromRequestParts, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Arc::new(pool),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Run a store call off the async executor; the connection lock and
    /// SQLite I/O are both blocking.
    pub(crate) async fn run<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || f(&pool))
            .await
            .map_err(|e| AppError::Db(format!("blocking task failed: {}", e)))?
    }
}

/// JSON body extractor whose rejection is an [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejection is an [`AppError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnsupportedFormat(_) | Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Db(_) | Self::Spreadsheet(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}: {}", self.code(), self);
        } else {
            log::warn!("{}: {}", self.code(), self);
        }
        (status, Json(self.to_serde())).into_response()
    }
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(req).await;
    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(pages::health))
        .route("/favicon.ico", get(pages::favicon))
        .route("/robots.txt", get(pages::robots))
        .route("/items/", post(item::create_item).get(item::list_items))
        .route("/items/group", delete(item::delete_items))
        .route(
            "/items/{item_id}",
            put(item::update_item).delete(item::delete_item),
        )
        .route(
            "/download-excel-template",
            get(data_transfer::download_template),
        )
        .route("/download-excel-data", get(data_transfer::download_data))
        .route("/upload-excel", post(data_transfer::upload_excel))
        .fallback(pages::not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
