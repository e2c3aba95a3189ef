//! Span helpers for DDL generation

use crate::attributes::*;

/// Attributes of one `CREATE TABLE` rendering
#[derive(Debug, Clone)]
pub struct DdlSpanAttributes {
    pub table_id: i64,
    pub table_name: String,
    pub column_count: usize,
    /// Columns whose datatype did not resolve and fell back to `TEXT`
    pub fallback_count: usize,
}

/// Record a span for a completed DDL generation.
///
/// The span carries the table identity and the shape of the rendered
/// statement so that slow or degraded generations (many fallbacks) can be
/// found in a trace backend.
pub fn trace_ddl_generation(attrs: DdlSpanAttributes) {
    let span = tracing::info_span!(
        "generate_ddl",
        { SDT_OPERATION_NAME } = "generate_ddl",
        { SDT_TABLE_ID } = attrs.table_id,
        { SDT_TABLE_NAME } = %attrs.table_name,
        { SDT_DDL_COLUMN_COUNT } = attrs.column_count as u64,
        { SDT_DDL_FALLBACK_COUNT } = attrs.fallback_count as u64,
    );

    let _guard = span.enter();
}
