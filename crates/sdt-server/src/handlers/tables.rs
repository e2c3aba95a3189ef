use super::{EMPTY_UPDATE, deleted};
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, required};
use crate::rest::AppState;
use crate::types::{ProjectFilter, TableFilter, TableNameResponse};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sdt_core::{Error, MetadataStore, NewTable, SchemaReader, Table, TableUpdate};

pub async fn list_tables(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProjectFilter>,
) -> Result<Json<Vec<Table>>, AppError> {
    let project_id = required(filter.project_id, "project_id")?;
    Ok(Json(state.store.list_tables(project_id).await?))
}

pub async fn get_table(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Table>, AppError> {
    let table = state
        .store
        .get_table(id)
        .await?
        .ok_or_else(|| Error::not_found("table", id))?;
    Ok(Json(table))
}

pub async fn create_table(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewTable>,
) -> Result<(StatusCode, Json<Table>), AppError> {
    req.validate()?;
    let table = state.store.create_table(&req).await?;
    tracing::info!(
        table_id = table.table_id,
        project_id = table.project_id,
        "Table created"
    );
    Ok((StatusCode::CREATED, Json(table)))
}

pub async fn update_table(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<TableUpdate>,
) -> Result<Json<Table>, AppError> {
    if update.is_empty() {
        return Err(AppError::bad_request(EMPTY_UPDATE));
    }
    update.validate()?;

    let table = state
        .store
        .update_table(id, update)
        .await?
        .ok_or_else(|| Error::not_found("table", id))?;
    Ok(Json(table))
}

pub async fn delete_table(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_table(id).await?, "table", id)
}

pub async fn get_table_name(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TableFilter>,
) -> Result<Json<TableNameResponse>, AppError> {
    let table_id = required(filter.table_id, "table_id")?;
    let table_name = state
        .store
        .table_name(table_id)
        .await?
        .ok_or_else(|| Error::not_found("table", table_id))?;
    Ok(Json(TableNameResponse { table_name }))
}
