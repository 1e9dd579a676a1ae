//! Bulk CSV import HTTP handler

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::{
    errors::{AppError, AppResult},
    models::RecordKind,
};

use crate::web::{responses::ok, AppState};

/// Request body for `POST /api/import`
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub kind: RecordKind,
    /// Server-side CSV file; defaults to the configured file for `kind`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Import a CSV file into the table selected by `kind`
///
/// The import stops at the first failing insert. Records before it remain
/// stored, and the error response names the failing record's position.
pub async fn import_csv(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|rejection| AppError::validation(rejection.body_text()))?;

    let path = request
        .path
        .unwrap_or_else(|| state.config.import.csv_path(request.kind).to_path_buf());

    let summary = state
        .database
        .import_pipeline(state.config.import.on_malformed_row)
        .import_file(&path, request.kind)
        .await?;

    Ok(ok(summary))
}
