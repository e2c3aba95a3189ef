use super::{EMPTY_UPDATE, deleted};
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::rest::AppState;
use crate::types::DatatypeFilter;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sdt_core::{Datatype, DatatypeUpdate, Error, MetadataStore, NewDatatype};

pub async fn list_datatypes(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<DatatypeFilter>,
) -> Result<Json<Vec<Datatype>>, AppError> {
    Ok(Json(state.store.list_datatypes(filter.database_id).await?))
}

pub async fn get_datatype(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Datatype>, AppError> {
    let datatype = state
        .store
        .get_datatype(id)
        .await?
        .ok_or_else(|| Error::not_found("datatype", id))?;
    Ok(Json(datatype))
}

pub async fn create_datatype(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewDatatype>,
) -> Result<(StatusCode, Json<Datatype>), AppError> {
    req.validate()?;
    let datatype = state.store.create_datatype(&req).await?;
    Ok((StatusCode::CREATED, Json(datatype)))
}

pub async fn update_datatype(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<DatatypeUpdate>,
) -> Result<Json<Datatype>, AppError> {
    if update.is_empty() {
        return Err(AppError::bad_request(EMPTY_UPDATE));
    }
    update.validate()?;

    let datatype = state
        .store
        .update_datatype(id, update)
        .await?
        .ok_or_else(|| Error::not_found("datatype", id))?;
    Ok(Json(datatype))
}

pub async fn delete_datatype(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_datatype(id).await?, "datatype", id)
}
