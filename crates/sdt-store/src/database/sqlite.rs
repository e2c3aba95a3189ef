//! SQLite-backed metadata store

use sdt_core::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

use super::store_error;

/// SQLite-backed metadata store
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open a connection pool, creating the database file if needed.
    ///
    /// An in-memory database lives only as long as its connection, so a
    /// `:memory:` URL gets a single connection that is never recycled.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| Error::config_error(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| Error::unavailable(format!("Failed to connect to SQLite: {}", e)))?;

        tracing::info!(in_memory, "Opened SQLite metadata store");
        Ok(Self { pool })
    }

    /// Create from an existing pool
    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Create the metadata tables if they do not exist
    pub async fn migrate(&self) -> Result<()> {
        super::migrations::run_sqlite_migrations(&self.pool)
            .await
            .map_err(|e| store_error("run migrations", e))
    }
}

impl_sql_store!(SqliteStore);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sdt_core::{
        DatatypeUpdate, FieldUpdate, MetadataStore, NewDatabase, NewDatatype, NewField,
        NewProject, NewTable, SchemaReader, TableUpdate,
    };

    async fn memory_store() -> SqliteStore {
        let store = SqliteStore::connect("sqlite::memory:", 5)
            .await
            .expect("Failed to open in-memory SQLite");
        store.migrate().await.expect("Failed to migrate");
        store
    }

    async fn seed_table(store: &SqliteStore) -> (i64, i64) {
        let database = store
            .create_database(&NewDatabase {
                database_name: "PostgreSQL".to_string(),
            })
            .await
            .unwrap();
        let project = store
            .create_project(&NewProject {
                project_name: "shop".to_string(),
                project_description: None,
                database_id: database.database_id,
                database_path: None,
                project_path: None,
            })
            .await
            .unwrap();
        let table = store
            .create_table(&NewTable {
                project_id: project.project_id,
                table_name: "users".to_string(),
                table_description: Some("registered users".to_string()),
                is_generated: false,
                generated_date: None,
            })
            .await
            .unwrap();
        (project.project_id, table.table_id)
    }

    fn new_field(table_id: i64, name: &str, datatype_id: i64) -> NewField {
        NewField {
            table_id,
            field_name: name.to_string(),
            field_datatype_id: datatype_id,
            is_primary: false,
            field_label: None,
            display_name: None,
            is_auto_increment: false,
            is_foreign_key: false,
            reference_table_id: None,
            reference_table_field_id: None,
        }
    }

    #[tokio::test]
    async fn test_sqlite_ping_and_migrate_twice() {
        let store = memory_store().await;
        store.ping().await.unwrap();
        // Migrations are idempotent
        store.migrate().await.unwrap();
        assert!(store.list_databases().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_table_and_fields_round_trip() {
        let store = memory_store().await;
        let (project_id, table_id) = seed_table(&store).await;

        let int_type = store
            .create_datatype(&NewDatatype {
                database_id: 1,
                display_name: "Integer".to_string(),
                sql_type_name: "INTEGER".to_string(),
            })
            .await
            .unwrap();

        let mut id_field = new_field(table_id, "id", int_type.field_datatype_id);
        id_field.is_primary = true;
        id_field.is_auto_increment = true;
        store.create_field(&id_field).await.unwrap();
        store
            .create_field(&new_field(table_id, "email", int_type.field_datatype_id))
            .await
            .unwrap();

        let table = store.get_table(table_id).await.unwrap().unwrap();
        assert_eq!(table.project_id, project_id);
        assert_eq!(table.table_description.as_deref(), Some("registered users"));

        let fields = store.list_fields(table_id).await.unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["id", "email"]);
        assert!(fields[0].is_primary && fields[0].is_auto_increment);

        assert_eq!(
            store
                .sql_type_name(int_type.field_datatype_id)
                .await
                .unwrap()
                .as_deref(),
            Some("INTEGER")
        );
        assert_eq!(store.sql_type_name(999).await.unwrap(), None);
        assert_eq!(
            store.table_name(table_id).await.unwrap().as_deref(),
            Some("users")
        );
    }

    #[tokio::test]
    async fn test_sqlite_partial_update_keeps_other_columns() {
        let store = memory_store().await;
        let (_, table_id) = seed_table(&store).await;
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

        let updated = store
            .update_table(
                table_id,
                TableUpdate {
                    is_generated: Some(true),
                    generated_date: Some(Some(generated_at)),
                    ..TableUpdate::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.table_name, "users");
        assert_eq!(updated.table_description.as_deref(), Some("registered users"));
        assert!(updated.is_generated);
        assert_eq!(updated.generated_date, Some(generated_at));

        let cleared = store
            .update_table(
                table_id,
                TableUpdate {
                    table_description: Some(None),
                    ..TableUpdate::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.table_description, None);
        assert_eq!(cleared.generated_date, Some(generated_at));

        let missing = store
            .update_datatype(
                42,
                DatatypeUpdate {
                    display_name: Some("Text".to_string()),
                    ..DatatypeUpdate::default()
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_sqlite_delete_project_cascades() {
        let store = memory_store().await;
        let (project_id, table_id) = seed_table(&store).await;
        let field = store
            .create_field(&new_field(table_id, "id", 1))
            .await
            .unwrap();

        assert!(store.delete_project(project_id).await.unwrap());
        assert!(store.get_table(table_id).await.unwrap().is_none());
        assert!(
            store
                .get_field(field.table_wise_field_id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!store.delete_project(project_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_sqlite_missing_parent_is_invalid_input() {
        let store = memory_store().await;

        let err = store
            .create_field(&new_field(77, "orphan", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let (_, table_id) = seed_table(&store).await;
        let field = store
            .create_field(&new_field(table_id, "id", 1))
            .await
            .unwrap();
        let err = store
            .update_field(
                field.table_wise_field_id,
                FieldUpdate {
                    table_id: Some(500),
                    ..FieldUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_sqlite_file_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("metadata.db").display());

        {
            let store = SqliteStore::connect(&url, 2).await.unwrap();
            store.migrate().await.unwrap();
            seed_table(&store).await;
        }

        let store = SqliteStore::connect(&url, 2).await.unwrap();
        store.migrate().await.unwrap();
        let projects = store.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].project_name, "shop");
        assert_eq!(store.list_tables(projects[0].project_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_datatype_filter() {
        let store = memory_store().await;
        for (database_id, name) in [(1, "INTEGER"), (2, "NUMBER"), (1, "VARCHAR")] {
            store
                .create_datatype(&NewDatatype {
                    database_id,
                    display_name: name.to_lowercase(),
                    sql_type_name: name.to_string(),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.list_datatypes(None).await.unwrap().len(), 3);
        let postgres_types: Vec<_> = store
            .list_datatypes(Some(1))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.sql_type_name)
            .collect();
        assert_eq!(postgres_types, vec!["INTEGER", "VARCHAR"]);
    }
}
