//! Stat record HTTP handlers
//!
//! One set of handlers serves both tables; the record type parameter picks
//! the table, the JSON shape and the CSV layout. Request bodies are the
//! camelCase JSON form of the record.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    errors::{AppError, AppResult},
    ingestor::write_records,
    models::InsertOutcome,
    repositories::{Repository, StatRepository, StatTable},
};

use crate::web::{
    responses::{created, ok},
    utils::parse_id,
    AppState,
};

/// A stat record that can travel over the JSON API
pub trait ApiRecord: StatTable + Serialize + DeserializeOwned {}

impl<T: StatTable + Serialize + DeserializeOwned> ApiRecord for T {}

fn repository<T: ApiRecord>(state: &AppState) -> StatRepository<T> {
    state.database.table()
}

fn body<T: ApiRecord>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(record)| record)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

/// List all records ordered by id
pub async fn list<T: ApiRecord>(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = repository::<T>(&state).find_all().await?;
    Ok(ok(rows))
}

pub async fn get<T: ApiRecord>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let row = repository::<T>(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(T::KIND.noun(), id.to_string()))?;
    Ok(ok(row))
}

/// Insert a record; an existing `(name, team)` is left unchanged
pub async fn create<T: ApiRecord>(
    State(state): State<AppState>,
    payload: Result<Json<T>, JsonRejection>,
) -> AppResult<Response> {
    let record = body(payload)?;
    let outcome = repository::<T>(&state).create(&record).await?;

    Ok(match outcome {
        InsertOutcome::Inserted(id) => {
            info!(
                "Created {} {} ({}, {})",
                T::KIND.noun(),
                id,
                record.name(),
                record.team()
            );
            created(outcome).into_response()
        }
        InsertOutcome::Ignored => ok(outcome).into_response(),
    })
}

/// Replace every stat of an existing record
pub async fn update<T: ApiRecord>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let record = body(payload)?;
    repository::<T>(&state).update(id, &record).await?;
    Ok(ok(json!({ "updated": id })))
}

pub async fn delete<T: ApiRecord>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    repository::<T>(&state).delete(id).await?;
    info!("Deleted {} {}", T::KIND.noun(), id);
    Ok(ok(json!({ "deleted": id })))
}

/// Download the whole table as CSV in import column order
pub async fn export<T: ApiRecord>(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let records: Vec<T> = repository::<T>(&state)
        .find_all()
        .await?
        .into_iter()
        .map(|row| row.record)
        .collect();

    let mut csv = Vec::new();
    write_records(&mut csv, &records)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.csv\"", T::KIND),
            ),
        ],
        csv,
    ))
}
