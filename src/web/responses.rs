//! HTTP response types and utilities
//!
//! Every JSON endpoint answers with the same [`ApiResponse`] envelope, and
//! every error reaches the client through [`handle_error`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

use crate::errors::{AppError, ImportError, IngestError, RepositoryError};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
    /// Response timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn error_with_details(message: String, details: HashMap<String, String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            details: Some(details),
            timestamp: chrono::Utc::now(),
        }
    }
}

fn ingest_details(error: &IngestError) -> Option<HashMap<String, String>> {
    match error {
        IngestError::MalformedInput {
            row,
            column,
            field,
            value,
            expected,
        } => Some(HashMap::from([
            ("row".to_string(), row.to_string()),
            ("column".to_string(), column.to_string()),
            ("field".to_string(), field.to_string()),
            ("value".to_string(), value.clone()),
            ("expected".to_string(), expected.to_string()),
        ])),
        IngestError::MissingColumns {
            row,
            expected,
            found,
        } => Some(HashMap::from([
            ("row".to_string(), row.to_string()),
            ("expected".to_string(), expected.to_string()),
            ("found".to_string(), found.to_string()),
        ])),
        IngestError::InvalidUtf8 { row, column } => Some(HashMap::from([
            ("row".to_string(), row.to_string()),
            ("column".to_string(), column.to_string()),
        ])),
        IngestError::Io { .. } | IngestError::Csv(_) => None,
    }
}

fn ingest_status(error: &IngestError) -> StatusCode {
    match error {
        IngestError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND
        }
        IngestError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        IngestError::Csv(_)
        | IngestError::InvalidUtf8 { .. }
        | IngestError::MissingColumns { .. }
        | IngestError::MalformedInput { .. } => StatusCode::BAD_REQUEST,
    }
}

fn repository_status(error: &RepositoryError) -> StatusCode {
    match error {
        RepositoryError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        // Negative values rejected by the schema's CHECK constraints
        RepositoryError::ConstraintViolation { constraint, .. } if constraint == "check" => {
            StatusCode::BAD_REQUEST
        }
        RepositoryError::ConstraintViolation { .. } => StatusCode::CONFLICT,
        RepositoryError::ConnectionFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        RepositoryError::QueryFailed { .. } | RepositoryError::MigrationFailed { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn repository_message(error: &RepositoryError) -> String {
    match error {
        RepositoryError::RecordNotFound { .. } | RepositoryError::ConstraintViolation { .. } => {
            error.to_string()
        }
        _ => "Data access failed".to_string(),
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message, details) = match &error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone(), None),
        AppError::NotFound { resource, id } => (
            StatusCode::NOT_FOUND,
            format!("{} with id '{}' not found", resource, id),
            None,
        ),
        AppError::Repository(e) => (repository_status(e), repository_message(e), None),
        AppError::Ingest(e) => (ingest_status(e), e.to_string(), ingest_details(e)),
        AppError::Import(ImportError::Parse(e)) => {
            (ingest_status(e), e.to_string(), ingest_details(e))
        }
        AppError::Import(ImportError::Persistence {
            position,
            name,
            team,
            source,
        }) => (
            repository_status(source),
            error.to_string(),
            Some(HashMap::from([
                ("position".to_string(), position.to_string()),
                ("name".to_string(), name.clone()),
                ("team".to_string(), team.clone()),
            ])),
        ),
    };

    if status.is_server_error() {
        error!("Request failed: {}", error);
    }

    let response = if let Some(details) = details {
        ApiResponse::<()>::error_with_details(message, details)
    } else {
        ApiResponse::<()>::error(message)
    };

    (status, Json(response)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}

/// Success response helpers
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}
