use super::{EMPTY_UPDATE, deleted};
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, required};
use crate::rest::AppState;
use crate::types::TableFilter;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sdt_core::{Error, Field, FieldUpdate, MetadataStore, NewField, SchemaReader};

/// Fields of one table in stored order
pub async fn list_fields(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TableFilter>,
) -> Result<Json<Vec<Field>>, AppError> {
    let table_id = required(filter.table_id, "table_id")?;
    Ok(Json(state.store.list_fields(table_id).await?))
}

pub async fn get_field(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Field>, AppError> {
    let field = state
        .store
        .get_field(id)
        .await?
        .ok_or_else(|| Error::not_found("field", id))?;
    Ok(Json(field))
}

pub async fn create_field(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewField>,
) -> Result<(StatusCode, Json<Field>), AppError> {
    req.validate()?;
    let field = state.store.create_field(&req).await?;
    tracing::info!(
        field_id = field.table_wise_field_id,
        table_id = field.table_id,
        "Field created"
    );
    Ok((StatusCode::CREATED, Json(field)))
}

pub async fn update_field(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<FieldUpdate>,
) -> Result<Json<Field>, AppError> {
    if update.is_empty() {
        return Err(AppError::bad_request(EMPTY_UPDATE));
    }
    update.validate()?;

    let field = state
        .store
        .update_field(id, update)
        .await?
        .ok_or_else(|| Error::not_found("field", id))?;
    Ok(Json(field))
}

pub async fn delete_field(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_field(id).await?, "field", id)
}
