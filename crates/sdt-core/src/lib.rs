//! Core types and traits for SDT
//!
//! This crate holds the schema metadata model (databases, projects, tables,
//! fields, datatypes), the store traits every backend implements, the shared
//! error type and configuration loading.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

// Re-exports
pub use config::{LogFormat, ObservabilityConfig, SdtConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use model::{
    Database, DatabaseUpdate, Datatype, DatatypeUpdate, Field, FieldUpdate, NewDatabase,
    NewDatatype, NewField, NewProject, NewTable, Project, ProjectUpdate, Table, TableUpdate,
};
pub use store::{MetadataStore, SchemaReader};
