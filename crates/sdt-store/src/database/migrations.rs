//! Schema migrations for the metadata tables

use sqlx::{Pool, Postgres, Sqlite};

const POSTGRES_CREATE_DATABASE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS database_table (
    database_id BIGSERIAL PRIMARY KEY,
    database_name VARCHAR(255) NOT NULL
);
"#;

const POSTGRES_CREATE_PROJECT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS project_table (
    project_id BIGSERIAL PRIMARY KEY,
    project_name VARCHAR(255) NOT NULL,
    project_description TEXT,
    database_id BIGINT NOT NULL,
    database_path TEXT,
    project_path TEXT
);
"#;

const POSTGRES_CREATE_ALL_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS all_table (
    table_id BIGSERIAL PRIMARY KEY,
    project_id BIGINT NOT NULL REFERENCES project_table(project_id) ON DELETE CASCADE,
    table_name VARCHAR(255) NOT NULL,
    table_description TEXT,
    is_generated BOOLEAN NOT NULL DEFAULT FALSE,
    generated_date TIMESTAMPTZ
);
"#;

const POSTGRES_CREATE_TABLE_WISE_FIELD: &str = r#"
CREATE TABLE IF NOT EXISTS table_wise_field (
    table_wise_field_id BIGSERIAL PRIMARY KEY,
    table_id BIGINT NOT NULL REFERENCES all_table(table_id) ON DELETE CASCADE,
    field_name VARCHAR(255) NOT NULL,
    field_datatype_id BIGINT NOT NULL,
    is_primary BOOLEAN NOT NULL DEFAULT FALSE,
    field_label VARCHAR(255),
    display_name VARCHAR(255),
    is_auto_increment BOOLEAN NOT NULL DEFAULT FALSE,
    is_foreign_key BOOLEAN NOT NULL DEFAULT FALSE,
    reference_table_id BIGINT,
    reference_table_field_id BIGINT
);
"#;

const POSTGRES_CREATE_FIELD_DATATYPE: &str = r#"
CREATE TABLE IF NOT EXISTS field_datatype (
    field_datatype_id BIGSERIAL PRIMARY KEY,
    database_table_id BIGINT NOT NULL,
    display_name VARCHAR(255) NOT NULL,
    datatype_name VARCHAR(100) NOT NULL
);
"#;

const SQLITE_CREATE_DATABASE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS database_table (
    database_id INTEGER PRIMARY KEY AUTOINCREMENT,
    database_name TEXT NOT NULL
);
"#;

const SQLITE_CREATE_PROJECT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS project_table (
    project_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_name TEXT NOT NULL,
    project_description TEXT,
    database_id INTEGER NOT NULL,
    database_path TEXT,
    project_path TEXT
);
"#;

const SQLITE_CREATE_ALL_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS all_table (
    table_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES project_table(project_id) ON DELETE CASCADE,
    table_name TEXT NOT NULL,
    table_description TEXT,
    is_generated BOOLEAN NOT NULL DEFAULT 0,
    generated_date DATETIME
);
"#;

const SQLITE_CREATE_TABLE_WISE_FIELD: &str = r#"
CREATE TABLE IF NOT EXISTS table_wise_field (
    table_wise_field_id INTEGER PRIMARY KEY AUTOINCREMENT,
    table_id INTEGER NOT NULL REFERENCES all_table(table_id) ON DELETE CASCADE,
    field_name TEXT NOT NULL,
    field_datatype_id INTEGER NOT NULL,
    is_primary BOOLEAN NOT NULL DEFAULT 0,
    field_label TEXT,
    display_name TEXT,
    is_auto_increment BOOLEAN NOT NULL DEFAULT 0,
    is_foreign_key BOOLEAN NOT NULL DEFAULT 0,
    reference_table_id INTEGER,
    reference_table_field_id INTEGER
);
"#;

const SQLITE_CREATE_FIELD_DATATYPE: &str = r#"
CREATE TABLE IF NOT EXISTS field_datatype (
    field_datatype_id INTEGER PRIMARY KEY AUTOINCREMENT,
    database_table_id INTEGER NOT NULL,
    display_name TEXT NOT NULL,
    datatype_name TEXT NOT NULL
);
"#;

/// Same statement text for both drivers
const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_all_table_project ON all_table(project_id)",
    "CREATE INDEX IF NOT EXISTS idx_table_wise_field_table ON table_wise_field(table_id)",
    "CREATE INDEX IF NOT EXISTS idx_field_datatype_database ON field_datatype(database_table_id)",
];

/// Run migrations for PostgreSQL
pub async fn run_postgres_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query(POSTGRES_CREATE_DATABASE_TABLE).execute(pool).await?;
    sqlx::query(POSTGRES_CREATE_PROJECT_TABLE).execute(pool).await?;
    sqlx::query(POSTGRES_CREATE_ALL_TABLE).execute(pool).await?;
    sqlx::query(POSTGRES_CREATE_TABLE_WISE_FIELD).execute(pool).await?;
    sqlx::query(POSTGRES_CREATE_FIELD_DATATYPE).execute(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Run migrations for SQLite
pub async fn run_sqlite_migrations(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query(SQLITE_CREATE_DATABASE_TABLE).execute(pool).await?;
    sqlx::query(SQLITE_CREATE_PROJECT_TABLE).execute(pool).await?;
    sqlx::query(SQLITE_CREATE_ALL_TABLE).execute(pool).await?;
    sqlx::query(SQLITE_CREATE_TABLE_WISE_FIELD).execute(pool).await?;
    sqlx::query(SQLITE_CREATE_FIELD_DATATYPE).execute(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
