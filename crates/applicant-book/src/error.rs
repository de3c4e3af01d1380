use crate::config::ConfigError;
use crate::logic::commands::CommandError;
use crate::logic::LogicError;
use crate::photo::PhotoError;
use crate::storage::{CsvImportError, StorageError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Storage(StorageError),
    Import(CsvImportError),
    Logic(LogicError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Logic(LogicError::Parse(_)) => StatusCode::BAD_REQUEST,
            AppError::Logic(LogicError::Command(err)) => command_status(err),
            AppError::Logic(LogicError::Import(err)) | AppError::Import(err) => import_status(err),
            AppError::Logic(LogicError::Storage(_))
            | AppError::Storage(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn command_status(err: &CommandError) -> StatusCode {
    match err {
        CommandError::InvalidIndex | CommandError::ApplicantNotFound => StatusCode::NOT_FOUND,
        CommandError::DuplicateApplicant => StatusCode::CONFLICT,
        CommandError::Photo(PhotoError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::Photo(_) => StatusCode::BAD_REQUEST,
    }
}

fn import_status(err: &CsvImportError) -> StatusCode {
    match err {
        CsvImportError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CsvImportError::Csv(_) | CsvImportError::Field { .. } | CsvImportError::Rating { .. } => {
            StatusCode::BAD_REQUEST
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Logic(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Logic(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CsvImportError> for AppError {
    fn from(value: CsvImportError) -> Self {
        Self::Import(value)
    }
}

impl From<LogicError> for AppError {
    fn from(value: LogicError) -> Self {
        Self::Logic(value)
    }
}
