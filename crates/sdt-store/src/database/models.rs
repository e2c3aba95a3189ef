//! Row models for the metadata tables

use chrono::{DateTime, Utc};
use sdt_core::{Database, Datatype, Field, Project, Table};

/// Row of `database_table`
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct DatabaseRow {
    pub database_id: i64,
    pub database_name: String,
}

/// Row of `project_table`
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ProjectRow {
    pub project_id: i64,
    pub project_name: String,
    pub project_description: Option<String>,
    pub database_id: i64,
    pub database_path: Option<String>,
    pub project_path: Option<String>,
}

/// Row of `all_table`
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct TableRow {
    pub table_id: i64,
    pub project_id: i64,
    pub table_name: String,
    pub table_description: Option<String>,
    pub is_generated: bool,
    pub generated_date: Option<DateTime<Utc>>,
}

/// Row of `table_wise_field`
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct FieldRow {
    pub table_wise_field_id: i64,
    pub table_id: i64,
    pub field_name: String,
    pub field_datatype_id: i64,
    pub is_primary: bool,
    pub field_label: Option<String>,
    pub display_name: Option<String>,
    pub is_auto_increment: bool,
    pub is_foreign_key: bool,
    pub reference_table_id: Option<i64>,
    pub reference_table_field_id: Option<i64>,
}

/// Row of `field_datatype`
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct DatatypeRow {
    pub field_datatype_id: i64,
    pub database_table_id: i64,
    pub display_name: String,
    pub datatype_name: String,
}

impl From<DatabaseRow> for Database {
    fn from(row: DatabaseRow) -> Self {
        Database {
            database_id: row.database_id,
            database_name: row.database_name,
        }
    }
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            project_id: row.project_id,
            project_name: row.project_name,
            project_description: row.project_description,
            database_id: row.database_id,
            database_path: row.database_path,
            project_path: row.project_path,
        }
    }
}

impl From<TableRow> for Table {
    fn from(row: TableRow) -> Self {
        Table {
            table_id: row.table_id,
            project_id: row.project_id,
            table_name: row.table_name,
            table_description: row.table_description,
            is_generated: row.is_generated,
            generated_date: row.generated_date,
        }
    }
}

impl From<FieldRow> for Field {
    fn from(row: FieldRow) -> Self {
        Field {
            table_wise_field_id: row.table_wise_field_id,
            table_id: row.table_id,
            field_name: row.field_name,
            field_datatype_id: row.field_datatype_id,
            is_primary: row.is_primary,
            field_label: row.field_label,
            display_name: row.display_name,
            is_auto_increment: row.is_auto_increment,
            is_foreign_key: row.is_foreign_key,
            reference_table_id: row.reference_table_id,
            reference_table_field_id: row.reference_table_field_id,
        }
    }
}

impl From<DatatypeRow> for Datatype {
    fn from(row: DatatypeRow) -> Self {
        Datatype {
            field_datatype_id: row.field_datatype_id,
            database_id: row.database_table_id,
            display_name: row.display_name,
            sql_type_name: row.datatype_name,
        }
    }
}
