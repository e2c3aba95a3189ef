//! `CREATE TABLE` generation from stored schema metadata
//!
//! Given a table id, [`generate_create_table`] reads the table and its fields
//! through a [`SchemaReader`](sdt_core::SchemaReader), resolves each field's
//! datatype to its SQL type name and renders a single statement:
//!
//! ```text
//! CREATE TABLE users (
//!   id INTEGER SERIAL PRIMARY KEY,
//!   email TEXT
//! );
//! ```

mod column;
mod generator;

pub use column::{ColumnDefinition, FALLBACK_SQL_TYPE, render_create_table};
pub use generator::generate_create_table;
