// API tests for the metadata CRUD routes
// Each test drives a fresh router over the in-memory store

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use sdt_server::create_router;
use sdt_store::InMemoryStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_router(Arc::new(InMemoryStore::new()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        // Plain-text bodies (health checks) come back as a JSON string
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, value)
}

/// Database, project and table; returns the table id
async fn seed_table(app: &Router) -> i64 {
    let (status, database) = send(
        app,
        Method::POST,
        "/api/database",
        Some(json!({"database_name": "PostgreSQL"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, project) = send(
        app,
        Method::POST,
        "/api/project",
        Some(json!({
            "project_name": "shop",
            "project_description": "online shop",
            "database_id": database["database_id"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, table) = send(
        app,
        Method::POST,
        "/api/tables",
        Some(json!({
            "project_id": project["project_id"],
            "table_name": "users",
            "table_description": "",
            "generated_date": "",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    table["table_id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Project Manager API!");

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = send(&app, Method::GET, "/readiness", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "READY");
}

#[tokio::test]
async fn test_database_crud() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/database",
        Some(json!({"database_name": "MySQL"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["database_id"], 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/database/1",
        Some(json!({"database_name": "MariaDB"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["database_name"], "MariaDB");

    let (status, list) = send(&app, Method::GET, "/api/database", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/api/database/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/api/database/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "database 1 not found");
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let app = app();
    seed_table(&app).await;

    let (status, body) = send(&app, Method::PUT, "/api/project/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No valid fields to update");
}

#[tokio::test]
async fn test_partial_table_update() {
    let app = app();
    let table_id = seed_table(&app).await;

    let (status, table) = send(
        &app,
        Method::PUT,
        &format!("/api/tables/{}", table_id),
        Some(json!({"is_generated": true, "generated_date": "2024-03-01T12:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["table_name"], "users");
    assert_eq!(table["is_generated"], true);
    assert!(table["generated_date"].as_str().unwrap().starts_with("2024-03-01T12:00:00"));
}

#[tokio::test]
async fn test_tables_require_project_id() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/tables", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing project_id");

    let (status, body) = send(&app, Method::GET, "/api/tables?project_id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_table_for_missing_project_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tables",
        Some(json!({"project_id": 9, "table_name": "orphans"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("project 9"));
}

#[tokio::test]
async fn test_fields_listed_in_stored_order() {
    let app = app();
    let table_id = seed_table(&app).await;

    for name in ["zip", "city", "address"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/fields",
            Some(json!({
                "table_id": table_id,
                "field_name": name,
                "field_datatype_id": 1,
                "reference_table_id": "",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, fields) = send(
        &app,
        Method::GET,
        &format!("/api/fields?table_id={}", table_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = fields
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["zip", "city", "address"]);
    assert_eq!(fields[0]["reference_table_id"], Value::Null);
}

#[tokio::test]
async fn test_field_update_clears_label_and_reference() {
    let app = app();
    let table_id = seed_table(&app).await;

    let (status, field) = send(
        &app,
        Method::POST,
        "/api/fields",
        Some(json!({
            "table_id": table_id,
            "field_name": "customer_id",
            "field_datatype_id": 1,
            "field_label": "Customer",
            "is_foreign_key": true,
            "reference_table_id": 7,
            "reference_table_field_id": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/fields/{}", field["table_wise_field_id"]);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "field_label": "",
            "is_foreign_key": false,
            "reference_table_id": "",
            "reference_table_field_id": "",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, field) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field["field_label"], Value::Null);
    assert_eq!(field["is_foreign_key"], false);
    assert_eq!(field["reference_table_id"], Value::Null);
    assert_eq!(field["reference_table_field_id"], Value::Null);
    assert_eq!(field["field_name"], "customer_id");
}

#[tokio::test]
async fn test_delete_project_removes_tables() {
    let app = app();
    let table_id = seed_table(&app).await;

    let (status, _) = send(&app, Method::DELETE, "/api/project/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/tables/{}", table_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/project/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_datatype_filter_and_wire_names() {
    let app = app();

    for (database_id, name) in [(1, "INTEGER"), (2, "NUMBER")] {
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/datatype",
            Some(json!({
                "database_table_id": database_id,
                "display_name": name.to_lowercase(),
                "datatype_name": name,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["datatype_name"], name);
    }

    let (_, all) = send(&app, Method::GET, "/api/datatype", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, oracle) = send(&app, Method::GET, "/api/datatype?database_id=2", None).await;
    let oracle = oracle.as_array().unwrap();
    assert_eq!(oracle.len(), 1);
    assert_eq!(oracle[0]["database_table_id"], 2);
    assert_eq!(oracle[0]["datatype_name"], "NUMBER");
}

#[tokio::test]
async fn test_get_table_name() {
    let app = app();
    let table_id = seed_table(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/gettablename?table_id={}", table_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["table_name"], "users");

    let (status, _) = send(&app, Method::GET, "/api/gettablename?table_id=404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_json_body() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/database",
        Some(json!({"database_label": "wrong key"})),
    )
    .await;
    assert!(status.is_client_error());
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/database",
        Some(json!({"database_name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input: database_name must not be empty");
}
