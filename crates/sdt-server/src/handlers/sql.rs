use crate::error::AppError;
use crate::extract::{ApiQuery, required};
use crate::rest::AppState;
use crate::types::{GenerateSqlResponse, TableFilter};
use axum::Json;
use axum::extract::State;

/// `CREATE TABLE` statement for one stored table
pub async fn generate_sql(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TableFilter>,
) -> Result<Json<GenerateSqlResponse>, AppError> {
    let table_id = required(filter.table_id, "table_id")?;
    let query = sdt_ddl::generate_create_table(state.store.as_ref(), table_id).await?;
    Ok(Json(GenerateSqlResponse { query }))
}
