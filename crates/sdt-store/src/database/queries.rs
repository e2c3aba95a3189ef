//! SQL shared by the PostgreSQL and SQLite stores
//!
//! Both drivers accept `$N` placeholders and `RETURNING`.

// Databases
pub(super) const LIST_DATABASES: &str =
    "SELECT database_id, database_name FROM database_table ORDER BY database_id";

pub(super) const GET_DATABASE: &str =
    "SELECT database_id, database_name FROM database_table WHERE database_id = $1";

pub(super) const INSERT_DATABASE: &str =
    "INSERT INTO database_table (database_name) VALUES ($1) RETURNING database_id, database_name";

pub(super) const UPDATE_DATABASE: &str = r#"
UPDATE database_table SET database_name = $1
WHERE database_id = $2
RETURNING database_id, database_name
"#;

pub(super) const DELETE_DATABASE: &str = "DELETE FROM database_table WHERE database_id = $1";

// Projects
pub(super) const LIST_PROJECTS: &str = r#"
SELECT project_id, project_name, project_description, database_id, database_path, project_path
FROM project_table
ORDER BY project_id
"#;

pub(super) const GET_PROJECT: &str = r#"
SELECT project_id, project_name, project_description, database_id, database_path, project_path
FROM project_table
WHERE project_id = $1
"#;

pub(super) const INSERT_PROJECT: &str = r#"
INSERT INTO project_table (project_name, project_description, database_id, database_path, project_path)
VALUES ($1, $2, $3, $4, $5)
RETURNING project_id, project_name, project_description, database_id, database_path, project_path
"#;

pub(super) const UPDATE_PROJECT: &str = r#"
UPDATE project_table
SET project_name = $1, project_description = $2, database_id = $3,
    database_path = $4, project_path = $5
WHERE project_id = $6
RETURNING project_id, project_name, project_description, database_id, database_path, project_path
"#;

pub(super) const DELETE_PROJECT: &str = "DELETE FROM project_table WHERE project_id = $1";

// Tables
pub(super) const LIST_TABLES: &str = r#"
SELECT table_id, project_id, table_name, table_description, is_generated, generated_date
FROM all_table
WHERE project_id = $1
ORDER BY table_id
"#;

pub(super) const GET_TABLE: &str = r#"
SELECT table_id, project_id, table_name, table_description, is_generated, generated_date
FROM all_table
WHERE table_id = $1
"#;

pub(super) const INSERT_TABLE: &str = r#"
INSERT INTO all_table (project_id, table_name, table_description, is_generated, generated_date)
VALUES ($1, $2, $3, $4, $5)
RETURNING table_id, project_id, table_name, table_description, is_generated, generated_date
"#;

pub(super) const UPDATE_TABLE: &str = r#"
UPDATE all_table
SET table_name = $1, table_description = $2, is_generated = $3, generated_date = $4
WHERE table_id = $5
RETURNING table_id, project_id, table_name, table_description, is_generated, generated_date
"#;

pub(super) const DELETE_TABLE: &str = "DELETE FROM all_table WHERE table_id = $1";

pub(super) const TABLE_NAME: &str = "SELECT table_name FROM all_table WHERE table_id = $1";

// Fields
pub(super) const LIST_FIELDS: &str = r#"
SELECT table_wise_field_id, table_id, field_name, field_datatype_id, is_primary,
       field_label, display_name, is_auto_increment, is_foreign_key,
       reference_table_id, reference_table_field_id
FROM table_wise_field
WHERE table_id = $1
ORDER BY table_wise_field_id
"#;

pub(super) const GET_FIELD: &str = r#"
SELECT table_wise_field_id, table_id, field_name, field_datatype_id, is_primary,
       field_label, display_name, is_auto_increment, is_foreign_key,
       reference_table_id, reference_table_field_id
FROM table_wise_field
WHERE table_wise_field_id = $1
"#;

pub(super) const INSERT_FIELD: &str = r#"
INSERT INTO table_wise_field (
    table_id, field_name, field_datatype_id, is_primary, field_label, display_name,
    is_auto_increment, is_foreign_key, reference_table_id, reference_table_field_id
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
RETURNING table_wise_field_id, table_id, field_name, field_datatype_id, is_primary,
          field_label, display_name, is_auto_increment, is_foreign_key,
          reference_table_id, reference_table_field_id
"#;

pub(super) const UPDATE_FIELD: &str = r#"
UPDATE table_wise_field
SET table_id = $1, field_name = $2, field_datatype_id = $3, is_primary = $4,
    field_label = $5, display_name = $6, is_auto_increment = $7, is_foreign_key = $8,
    reference_table_id = $9, reference_table_field_id = $10
WHERE table_wise_field_id = $11
RETURNING table_wise_field_id, table_id, field_name, field_datatype_id, is_primary,
          field_label, display_name, is_auto_increment, is_foreign_key,
          reference_table_id, reference_table_field_id
"#;

pub(super) const DELETE_FIELD: &str =
    "DELETE FROM table_wise_field WHERE table_wise_field_id = $1";

// Datatypes
pub(super) const LIST_DATATYPES: &str = r#"
SELECT field_datatype_id, database_table_id, display_name, datatype_name
FROM field_datatype
ORDER BY field_datatype_id
"#;

pub(super) const LIST_DATATYPES_BY_DATABASE: &str = r#"
SELECT field_datatype_id, database_table_id, display_name, datatype_name
FROM field_datatype
WHERE database_table_id = $1
ORDER BY field_datatype_id
"#;

pub(super) const GET_DATATYPE: &str = r#"
SELECT field_datatype_id, database_table_id, display_name, datatype_name
FROM field_datatype
WHERE field_datatype_id = $1
"#;

pub(super) const INSERT_DATATYPE: &str = r#"
INSERT INTO field_datatype (database_table_id, display_name, datatype_name)
VALUES ($1, $2, $3)
RETURNING field_datatype_id, database_table_id, display_name, datatype_name
"#;

pub(super) const UPDATE_DATATYPE: &str = r#"
UPDATE field_datatype
SET database_table_id = $1, display_name = $2, datatype_name = $3
WHERE field_datatype_id = $4
RETURNING field_datatype_id, database_table_id, display_name, datatype_name
"#;

pub(super) const DELETE_DATATYPE: &str =
    "DELETE FROM field_datatype WHERE field_datatype_id = $1";

pub(super) const SQL_TYPE_NAME: &str =
    "SELECT datatype_name FROM field_datatype WHERE field_datatype_id = $1";

pub(super) const PING: &str = "SELECT 1";
