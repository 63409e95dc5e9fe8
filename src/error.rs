//! Stable error codes for API clients.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Db(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read spreadsheet: {0}")]
    Parse(String),

    #[error("Excel generation failed: {0}")]
    Spreadsheet(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "DB_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Spreadsheet(_) => "SPREADSHEET_ERROR",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
        }
    }

    /// Client-facing message. Internal failures are not echoed back.
    pub fn public_message(&self) -> String {
        match self {
            Self::Db(_) | Self::Spreadsheet(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_serde(&self) -> AppErrorDto {
        AppErrorDto {
            code: self.code().to_string(),
            message: self.public_message(),
            details: None,
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct AppErrorDto {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
