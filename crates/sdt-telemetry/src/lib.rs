//! # SDT Telemetry
//!
//! Logging and OpenTelemetry tracing for the schema design tool.
//!
//! `init_telemetry` installs the global `tracing` subscriber (text or JSON
//! output, `EnvFilter`, OpenTelemetry layer). The span helpers record the
//! DDL generation runs with a fixed set of attributes.

mod spans;
mod tracer;

pub use spans::{DdlSpanAttributes, trace_ddl_generation};
pub use tracer::{TelemetryOptions, init_telemetry, register_span_processor, tracer_provider};

/// Span attribute names
pub mod attributes {
    pub const SDT_OPERATION_NAME: &str = "sdt.operation.name";

    // Table being rendered
    pub const SDT_TABLE_ID: &str = "sdt.table.id";
    pub const SDT_TABLE_NAME: &str = "sdt.table.name";

    // Rendered statement
    pub const SDT_DDL_COLUMN_COUNT: &str = "sdt.ddl.column_count";
    pub const SDT_DDL_FALLBACK_COUNT: &str = "sdt.ddl.fallback_count";

    /// Instrumentation scope used when no service name is configured
    pub const SYSTEM_NAME: &str = "sdt";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names() {
        assert_eq!(attributes::SDT_TABLE_ID, "sdt.table.id");
        assert_eq!(attributes::SDT_DDL_FALLBACK_COUNT, "sdt.ddl.fallback_count");
        assert_eq!(attributes::SYSTEM_NAME, "sdt");
    }
}
