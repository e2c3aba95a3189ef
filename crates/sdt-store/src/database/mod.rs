//! SQL-backed metadata stores

use sdt_core::Error;

/// Map a driver error onto the store error kinds.
///
/// A foreign key violation means the request referenced a parent that does
/// not exist; everything else is reported as the store being unavailable.
pub(crate) fn store_error(context: &str, err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return Error::invalid_input(format!("{}: referenced record does not exist", context));
        }
    }
    tracing::error!(error = %err, "{} failed", context);
    Error::unavailable(format!("{}: {}", context, err))
}

/// Implements `SchemaReader` and `MetadataStore` for a store holding a
/// `pool: sqlx::Pool<_>` field. The statements in `queries` are portable
/// between the PostgreSQL and SQLite drivers.
macro_rules! impl_sql_store {
    ($store:ty) => {
        #[async_trait::async_trait]
        impl sdt_core::SchemaReader for $store {
            async fn get_table(&self, table_id: i64) -> sdt_core::Result<Option<sdt_core::Table>> {
                let row: Option<$crate::database::models::TableRow> =
                    sqlx::query_as($crate::database::queries::GET_TABLE)
                        .bind(table_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("get table", e))?;
                Ok(row.map(Into::into))
            }

            async fn list_fields(&self, table_id: i64) -> sdt_core::Result<Vec<sdt_core::Field>> {
                let rows: Vec<$crate::database::models::FieldRow> =
                    sqlx::query_as($crate::database::queries::LIST_FIELDS)
                        .bind(table_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("list fields", e))?;
                Ok(rows.into_iter().map(Into::into).collect())
            }

            async fn sql_type_name(&self, datatype_id: i64) -> sdt_core::Result<Option<String>> {
                sqlx::query_scalar($crate::database::queries::SQL_TYPE_NAME)
                    .bind(datatype_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("resolve datatype", e))
            }
        }

        #[async_trait::async_trait]
        impl sdt_core::MetadataStore for $store {
            async fn ping(&self) -> sdt_core::Result<()> {
                sqlx::query($crate::database::queries::PING)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("ping", e))?;
                Ok(())
            }

            async fn list_databases(&self) -> sdt_core::Result<Vec<sdt_core::Database>> {
                let rows: Vec<$crate::database::models::DatabaseRow> =
                    sqlx::query_as($crate::database::queries::LIST_DATABASES)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("list databases", e))?;
                Ok(rows.into_iter().map(Into::into).collect())
            }

            async fn get_database(
                &self,
                database_id: i64,
            ) -> sdt_core::Result<Option<sdt_core::Database>> {
                let row: Option<$crate::database::models::DatabaseRow> =
                    sqlx::query_as($crate::database::queries::GET_DATABASE)
                        .bind(database_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("get database", e))?;
                Ok(row.map(Into::into))
            }

            async fn create_database(
                &self,
                req: &sdt_core::NewDatabase,
            ) -> sdt_core::Result<sdt_core::Database> {
                let row: $crate::database::models::DatabaseRow =
                    sqlx::query_as($crate::database::queries::INSERT_DATABASE)
                        .bind(&req.database_name)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("create database", e))?;
                Ok(row.into())
            }

            async fn update_database(
                &self,
                database_id: i64,
                update: sdt_core::DatabaseUpdate,
            ) -> sdt_core::Result<Option<sdt_core::Database>> {
                let Some(mut database) =
                    sdt_core::MetadataStore::get_database(self, database_id).await?
                else {
                    return Ok(None);
                };
                update.apply(&mut database);

                let row: Option<$crate::database::models::DatabaseRow> =
                    sqlx::query_as($crate::database::queries::UPDATE_DATABASE)
                        .bind(&database.database_name)
                        .bind(database_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("update database", e))?;
                Ok(row.map(Into::into))
            }

            async fn delete_database(&self, database_id: i64) -> sdt_core::Result<bool> {
                let result = sqlx::query($crate::database::queries::DELETE_DATABASE)
                    .bind(database_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("delete database", e))?;
                Ok(result.rows_affected() > 0)
            }

            async fn list_projects(&self) -> sdt_core::Result<Vec<sdt_core::Project>> {
                let rows: Vec<$crate::database::models::ProjectRow> =
                    sqlx::query_as($crate::database::queries::LIST_PROJECTS)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("list projects", e))?;
                Ok(rows.into_iter().map(Into::into).collect())
            }

            async fn get_project(
                &self,
                project_id: i64,
            ) -> sdt_core::Result<Option<sdt_core::Project>> {
                let row: Option<$crate::database::models::ProjectRow> =
                    sqlx::query_as($crate::database::queries::GET_PROJECT)
                        .bind(project_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("get project", e))?;
                Ok(row.map(Into::into))
            }

            async fn create_project(
                &self,
                req: &sdt_core::NewProject,
            ) -> sdt_core::Result<sdt_core::Project> {
                let row: $crate::database::models::ProjectRow =
                    sqlx::query_as($crate::database::queries::INSERT_PROJECT)
                        .bind(&req.project_name)
                        .bind(&req.project_description)
                        .bind(req.database_id)
                        .bind(&req.database_path)
                        .bind(&req.project_path)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("create project", e))?;
                Ok(row.into())
            }

            async fn update_project(
                &self,
                project_id: i64,
                update: sdt_core::ProjectUpdate,
            ) -> sdt_core::Result<Option<sdt_core::Project>> {
                let Some(mut project) =
                    sdt_core::MetadataStore::get_project(self, project_id).await?
                else {
                    return Ok(None);
                };
                update.apply(&mut project);

                let row: Option<$crate::database::models::ProjectRow> =
                    sqlx::query_as($crate::database::queries::UPDATE_PROJECT)
                        .bind(&project.project_name)
                        .bind(&project.project_description)
                        .bind(project.database_id)
                        .bind(&project.database_path)
                        .bind(&project.project_path)
                        .bind(project_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("update project", e))?;
                Ok(row.map(Into::into))
            }

            async fn delete_project(&self, project_id: i64) -> sdt_core::Result<bool> {
                // Tables and fields go with it through ON DELETE CASCADE
                let result = sqlx::query($crate::database::queries::DELETE_PROJECT)
                    .bind(project_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("delete project", e))?;
                Ok(result.rows_affected() > 0)
            }

            async fn list_tables(&self, project_id: i64) -> sdt_core::Result<Vec<sdt_core::Table>> {
                let rows: Vec<$crate::database::models::TableRow> =
                    sqlx::query_as($crate::database::queries::LIST_TABLES)
                        .bind(project_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("list tables", e))?;
                Ok(rows.into_iter().map(Into::into).collect())
            }

            async fn create_table(
                &self,
                req: &sdt_core::NewTable,
            ) -> sdt_core::Result<sdt_core::Table> {
                let row: $crate::database::models::TableRow =
                    sqlx::query_as($crate::database::queries::INSERT_TABLE)
                        .bind(req.project_id)
                        .bind(&req.table_name)
                        .bind(&req.table_description)
                        .bind(req.is_generated)
                        .bind(req.generated_date)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("create table", e))?;
                Ok(row.into())
            }

            async fn update_table(
                &self,
                table_id: i64,
                update: sdt_core::TableUpdate,
            ) -> sdt_core::Result<Option<sdt_core::Table>> {
                let Some(mut table) = sdt_core::SchemaReader::get_table(self, table_id).await?
                else {
                    return Ok(None);
                };
                update.apply(&mut table);

                let row: Option<$crate::database::models::TableRow> =
                    sqlx::query_as($crate::database::queries::UPDATE_TABLE)
                        .bind(&table.table_name)
                        .bind(&table.table_description)
                        .bind(table.is_generated)
                        .bind(table.generated_date)
                        .bind(table_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("update table", e))?;
                Ok(row.map(Into::into))
            }

            async fn delete_table(&self, table_id: i64) -> sdt_core::Result<bool> {
                let result = sqlx::query($crate::database::queries::DELETE_TABLE)
                    .bind(table_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("delete table", e))?;
                Ok(result.rows_affected() > 0)
            }

            async fn table_name(&self, table_id: i64) -> sdt_core::Result<Option<String>> {
                sqlx::query_scalar($crate::database::queries::TABLE_NAME)
                    .bind(table_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("get table name", e))
            }

            async fn get_field(&self, field_id: i64) -> sdt_core::Result<Option<sdt_core::Field>> {
                let row: Option<$crate::database::models::FieldRow> =
                    sqlx::query_as($crate::database::queries::GET_FIELD)
                        .bind(field_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("get field", e))?;
                Ok(row.map(Into::into))
            }

            async fn create_field(
                &self,
                req: &sdt_core::NewField,
            ) -> sdt_core::Result<sdt_core::Field> {
                let row: $crate::database::models::FieldRow =
                    sqlx::query_as($crate::database::queries::INSERT_FIELD)
                        .bind(req.table_id)
                        .bind(&req.field_name)
                        .bind(req.field_datatype_id)
                        .bind(req.is_primary)
                        .bind(&req.field_label)
                        .bind(&req.display_name)
                        .bind(req.is_auto_increment)
                        .bind(req.is_foreign_key)
                        .bind(req.reference_table_id)
                        .bind(req.reference_table_field_id)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("create field", e))?;
                Ok(row.into())
            }

            async fn update_field(
                &self,
                field_id: i64,
                update: sdt_core::FieldUpdate,
            ) -> sdt_core::Result<Option<sdt_core::Field>> {
                let Some(mut field) = sdt_core::MetadataStore::get_field(self, field_id).await?
                else {
                    return Ok(None);
                };
                update.apply(&mut field);

                let row: Option<$crate::database::models::FieldRow> =
                    sqlx::query_as($crate::database::queries::UPDATE_FIELD)
                        .bind(field.table_id)
                        .bind(&field.field_name)
                        .bind(field.field_datatype_id)
                        .bind(field.is_primary)
                        .bind(&field.field_label)
                        .bind(&field.display_name)
                        .bind(field.is_auto_increment)
                        .bind(field.is_foreign_key)
                        .bind(field.reference_table_id)
                        .bind(field.reference_table_field_id)
                        .bind(field_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("update field", e))?;
                Ok(row.map(Into::into))
            }

            async fn delete_field(&self, field_id: i64) -> sdt_core::Result<bool> {
                let result = sqlx::query($crate::database::queries::DELETE_FIELD)
                    .bind(field_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("delete field", e))?;
                Ok(result.rows_affected() > 0)
            }

            async fn list_datatypes(
                &self,
                database_id: Option<i64>,
            ) -> sdt_core::Result<Vec<sdt_core::Datatype>> {
                let query = match database_id {
                    Some(id) => sqlx::query_as(
                        $crate::database::queries::LIST_DATATYPES_BY_DATABASE,
                    )
                    .bind(id),
                    None => sqlx::query_as($crate::database::queries::LIST_DATATYPES),
                };
                let rows: Vec<$crate::database::models::DatatypeRow> = query
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("list datatypes", e))?;
                Ok(rows.into_iter().map(Into::into).collect())
            }

            async fn get_datatype(
                &self,
                datatype_id: i64,
            ) -> sdt_core::Result<Option<sdt_core::Datatype>> {
                let row: Option<$crate::database::models::DatatypeRow> =
                    sqlx::query_as($crate::database::queries::GET_DATATYPE)
                        .bind(datatype_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("get datatype", e))?;
                Ok(row.map(Into::into))
            }

            async fn create_datatype(
                &self,
                req: &sdt_core::NewDatatype,
            ) -> sdt_core::Result<sdt_core::Datatype> {
                let row: $crate::database::models::DatatypeRow =
                    sqlx::query_as($crate::database::queries::INSERT_DATATYPE)
                        .bind(req.database_id)
                        .bind(&req.display_name)
                        .bind(&req.sql_type_name)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("create datatype", e))?;
                Ok(row.into())
            }

            async fn update_datatype(
                &self,
                datatype_id: i64,
                update: sdt_core::DatatypeUpdate,
            ) -> sdt_core::Result<Option<sdt_core::Datatype>> {
                let Some(mut datatype) =
                    sdt_core::MetadataStore::get_datatype(self, datatype_id).await?
                else {
                    return Ok(None);
                };
                update.apply(&mut datatype);

                let row: Option<$crate::database::models::DatatypeRow> =
                    sqlx::query_as($crate::database::queries::UPDATE_DATATYPE)
                        .bind(datatype.database_id)
                        .bind(&datatype.display_name)
                        .bind(&datatype.sql_type_name)
                        .bind(datatype_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| $crate::database::store_error("update datatype", e))?;
                Ok(row.map(Into::into))
            }

            async fn delete_datatype(&self, datatype_id: i64) -> sdt_core::Result<bool> {
                let result = sqlx::query($crate::database::queries::DELETE_DATATYPE)
                    .bind(datatype_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| $crate::database::store_error("delete datatype", e))?;
                Ok(result.rows_affected() > 0)
            }
        }
    };
}

mod migrations;
mod models;
mod queries;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use migrations::{run_postgres_migrations, run_sqlite_migrations};

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
