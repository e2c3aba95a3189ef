//! Store traits implemented by every metadata backend

use crate::error::Result;
use crate::model::{
    Database, DatabaseUpdate, Datatype, DatatypeUpdate, Field, FieldUpdate, NewDatabase,
    NewDatatype, NewField, NewProject, NewTable, Project, ProjectUpdate, Table, TableUpdate,
};
use async_trait::async_trait;

/// Read access needed to render a table's DDL
#[async_trait]
pub trait SchemaReader: Send + Sync {
    async fn get_table(&self, table_id: i64) -> Result<Option<Table>>;

    /// Fields of a table in ascending stored order
    async fn list_fields(&self, table_id: i64) -> Result<Vec<Field>>;

    /// SQL type keyword of a datatype, `None` when the id matches nothing
    async fn sql_type_name(&self, datatype_id: i64) -> Result<Option<String>>;
}

/// Metadata store trait
///
/// `get_*`/`update_*` return `None` and `delete_*` return `false` when the
/// record does not exist; the caller decides whether that is an error.
/// Listings are ordered by ascending id.
#[async_trait]
pub trait MetadataStore: SchemaReader {
    /// Verify the backend is reachable
    async fn ping(&self) -> Result<()>;

    async fn list_databases(&self) -> Result<Vec<Database>>;
    async fn get_database(&self, database_id: i64) -> Result<Option<Database>>;
    async fn create_database(&self, req: &NewDatabase) -> Result<Database>;
    async fn update_database(
        &self,
        database_id: i64,
        update: DatabaseUpdate,
    ) -> Result<Option<Database>>;
    async fn delete_database(&self, database_id: i64) -> Result<bool>;

    async fn list_projects(&self) -> Result<Vec<Project>>;
    async fn get_project(&self, project_id: i64) -> Result<Option<Project>>;
    async fn create_project(&self, req: &NewProject) -> Result<Project>;
    async fn update_project(
        &self,
        project_id: i64,
        update: ProjectUpdate,
    ) -> Result<Option<Project>>;
    /// Deletes the project's tables and their fields as well
    async fn delete_project(&self, project_id: i64) -> Result<bool>;

    async fn list_tables(&self, project_id: i64) -> Result<Vec<Table>>;
    async fn create_table(&self, req: &NewTable) -> Result<Table>;
    async fn update_table(&self, table_id: i64, update: TableUpdate) -> Result<Option<Table>>;
    /// Deletes the table's fields as well
    async fn delete_table(&self, table_id: i64) -> Result<bool>;

    async fn table_name(&self, table_id: i64) -> Result<Option<String>> {
        Ok(self.get_table(table_id).await?.map(|t| t.table_name))
    }

    async fn get_field(&self, field_id: i64) -> Result<Option<Field>>;
    async fn create_field(&self, req: &NewField) -> Result<Field>;
    async fn update_field(&self, field_id: i64, update: FieldUpdate) -> Result<Option<Field>>;
    async fn delete_field(&self, field_id: i64) -> Result<bool>;

    /// All datatypes, or only those of one engine
    async fn list_datatypes(&self, database_id: Option<i64>) -> Result<Vec<Datatype>>;
    async fn get_datatype(&self, datatype_id: i64) -> Result<Option<Datatype>>;
    async fn create_datatype(&self, req: &NewDatatype) -> Result<Datatype>;
    async fn update_datatype(
        &self,
        datatype_id: i64,
        update: DatatypeUpdate,
    ) -> Result<Option<Datatype>>;
    async fn delete_datatype(&self, datatype_id: i64) -> Result<bool>;
}
