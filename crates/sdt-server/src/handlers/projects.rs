use super::{EMPTY_UPDATE, deleted};
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::rest::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sdt_core::{Error, MetadataStore, NewProject, Project, ProjectUpdate};

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.store.list_projects().await?))
}

pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or_else(|| Error::not_found("project", id))?;
    Ok(Json(project))
}

pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    req.validate()?;
    let project = state.store.create_project(&req).await?;
    tracing::info!(project_id = project.project_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<ProjectUpdate>,
) -> Result<Json<Project>, AppError> {
    if update.is_empty() {
        return Err(AppError::bad_request(EMPTY_UPDATE));
    }
    update.validate()?;

    let project = state
        .store
        .update_project(id, update)
        .await?
        .ok_or_else(|| Error::not_found("project", id))?;
    Ok(Json(project))
}

/// Removes the project together with its tables and their fields
pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    let removed = state.store.delete_project(id).await?;
    if removed {
        tracing::info!(project_id = id, "Project deleted");
    }
    deleted(removed, "project", id)
}
