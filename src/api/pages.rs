//! Browser page and housekeeping endpoints.

use crate::error::AppError;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Serialize;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResp> {
    Json(HealthResp {
        status: "healthy",
        message: "Itemsheet is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn robots() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        "User-agent: *\nDisallow: /",
    )
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("route {}", uri.path()))
}
