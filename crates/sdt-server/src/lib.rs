//! HTTP API for the schema design tool

pub mod error;
pub mod extract;
pub mod handlers;
pub mod rest;
pub mod types;

pub use error::AppError;
pub use rest::{AppState, create_router};
pub use types::*;
