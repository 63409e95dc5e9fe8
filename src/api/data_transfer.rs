//! Excel download / upload handlers.

use super::AppState;
use crate::app::{
    excel_template, export_items_xlsx, import_items_xlsx, ItemImportResult, SpreadsheetFile,
};
use crate::error::AppError;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

const UPLOAD_FIELD: &str = "file";

/// A body over the size limit keeps its 413; anything else is a bad upload.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Parse(e.body_text())
    }
}

impl IntoResponse for SpreadsheetFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

pub async fn download_template() -> Result<SpreadsheetFile, AppError> {
    excel_template()
}

pub async fn download_data(State(state): State<AppState>) -> Result<SpreadsheetFile, AppError> {
    state.run(export_items_xlsx).await
}

pub async fn upload_excel(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ItemImportResult>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{}' is required", UPLOAD_FIELD))
    })?;
    log::info!("Received upload '{}' ({} bytes)", file_name, bytes.len());

    state
        .run(move |pool| import_items_xlsx(pool, &file_name, &bytes))
        .await
        .map(Json)
}
