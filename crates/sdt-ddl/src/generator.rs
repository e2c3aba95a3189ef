use crate::column::{ColumnDefinition, FALLBACK_SQL_TYPE, render_create_table};
use sdt_core::{Error, Result, SchemaReader};
use sdt_telemetry::{DdlSpanAttributes, trace_ddl_generation};

/// Build the `CREATE TABLE` statement for `table_id`.
///
/// Fails with `NotFound` when the table does not exist and propagates store
/// failures unchanged. A field whose datatype does not resolve is rendered as
/// `TEXT` and never fails the call. Nothing is written back to the store.
pub async fn generate_create_table<S>(store: &S, table_id: i64) -> Result<String>
where
    S: SchemaReader + ?Sized,
{
    let table = store
        .get_table(table_id)
        .await?
        .ok_or_else(|| Error::not_found("table", table_id))?;

    let fields = store.list_fields(table_id).await?;

    let mut columns = Vec::with_capacity(fields.len());
    let mut fallback_count = 0;
    for field in fields {
        let sql_type = match store.sql_type_name(field.field_datatype_id).await? {
            Some(name) => name,
            None => {
                tracing::warn!(
                    table_id,
                    field = %field.field_name,
                    datatype_id = field.field_datatype_id,
                    "Datatype not found, falling back to {}",
                    FALLBACK_SQL_TYPE
                );
                fallback_count += 1;
                FALLBACK_SQL_TYPE.to_string()
            }
        };

        columns.push(
            ColumnDefinition::new(field.field_name, sql_type)
                .auto_increment(field.is_auto_increment)
                .primary_key(field.is_primary),
        );
    }

    let ddl = render_create_table(&table.table_name, &columns);

    trace_ddl_generation(DdlSpanAttributes {
        table_id,
        table_name: table.table_name,
        column_count: columns.len(),
        fallback_count,
    });

    Ok(ddl)
}
