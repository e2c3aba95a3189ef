//! Route handlers, one module per resource

pub mod databases;
pub mod datatypes;
pub mod fields;
pub mod projects;
pub mod sql;
pub mod tables;

use crate::error::AppError;
use axum::http::StatusCode;
use sdt_core::Error;

/// Message used when a `PUT` body sets no field
pub(crate) const EMPTY_UPDATE: &str = "No valid fields to update";

/// 204 when a record was removed, 404 otherwise
pub(crate) fn deleted(
    removed: bool,
    entity: &'static str,
    id: i64,
) -> Result<StatusCode, AppError> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(entity, id).into())
    }
}
