use crate::handlers::{databases, datatypes, fields, projects, sql, tables};
use crate::types::MessageResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sdt_core::MetadataStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MetadataStore>,
}

pub fn create_router(store: Arc<dyn MetadataStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(welcome))
        // Health check endpoints
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        // Metadata CRUD
        .route(
            "/api/database",
            get(databases::list_databases).post(databases::create_database),
        )
        .route(
            "/api/database/:id",
            get(databases::get_database)
                .put(databases::update_database)
                .delete(databases::delete_database),
        )
        .route(
            "/api/project",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/project/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/api/tables",
            get(tables::list_tables).post(tables::create_table),
        )
        .route(
            "/api/tables/:id",
            get(tables::get_table)
                .put(tables::update_table)
                .delete(tables::delete_table),
        )
        .route("/api/gettablename", get(tables::get_table_name))
        .route(
            "/api/fields",
            get(fields::list_fields).post(fields::create_field),
        )
        .route(
            "/api/fields/:id",
            get(fields::get_field)
                .put(fields::update_field)
                .delete(fields::delete_field),
        )
        .route(
            "/api/datatype",
            get(datatypes::list_datatypes).post(datatypes::create_datatype),
        )
        .route(
            "/api/datatype/:id",
            get(datatypes::get_datatype)
                .put(datatypes::update_datatype)
                .delete(datatypes::delete_datatype),
        )
        // DDL generation
        .route("/api/generate-sql", get(sql::generate_sql))
        // Middleware layers (applied in reverse order)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Project Manager API!".to_string(),
    })
}

/// Health check endpoint - returns OK if the service is running
async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check requested");
    (StatusCode::OK, "OK")
}

/// Readiness check endpoint - verifies the metadata store answers
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    tracing::debug!("Readiness check requested");

    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "READY"),
        Err(e) => {
            tracing::warn!(error = %e, "Metadata store not ready");
            (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
        }
    }
}
