use super::{EMPTY_UPDATE, deleted};
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::rest::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sdt_core::{Database, DatabaseUpdate, Error, MetadataStore, NewDatabase};

pub async fn list_databases(
    State(state): State<AppState>,
) -> Result<Json<Vec<Database>>, AppError> {
    Ok(Json(state.store.list_databases().await?))
}

pub async fn get_database(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Database>, AppError> {
    let database = state
        .store
        .get_database(id)
        .await?
        .ok_or_else(|| Error::not_found("database", id))?;
    Ok(Json(database))
}

pub async fn create_database(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewDatabase>,
) -> Result<(StatusCode, Json<Database>), AppError> {
    req.validate()?;
    let database = state.store.create_database(&req).await?;
    tracing::info!(database_id = database.database_id, "Database created");
    Ok((StatusCode::CREATED, Json(database)))
}

pub async fn update_database(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<DatabaseUpdate>,
) -> Result<Json<Database>, AppError> {
    if update.is_empty() {
        return Err(AppError::bad_request(EMPTY_UPDATE));
    }
    update.validate()?;

    let database = state
        .store
        .update_database(id, update)
        .await?
        .ok_or_else(|| Error::not_found("database", id))?;
    Ok(Json(database))
}

pub async fn delete_database(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_database(id).await?, "database", id)
}
