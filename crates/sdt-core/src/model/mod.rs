//! Schema metadata records and their create/update inputs
//!
//! Wire names follow the admin client's JSON (`table_wise_field_id`,
//! `field_datatype_id`, ...), so existing clients keep working unchanged.

mod database;
mod datatype;
mod field;
mod project;
mod table;

pub use database::{Database, DatabaseUpdate, NewDatabase};
pub use datatype::{Datatype, DatatypeUpdate, NewDatatype};
pub use field::{Field, FieldUpdate, NewField};
pub use project::{NewProject, Project, ProjectUpdate};
pub use table::{NewTable, Table, TableUpdate};

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};

pub(crate) const NAME_MAX_LEN: usize = 255;
pub(crate) const DATATYPE_NAME_MAX_LEN: usize = 100;

fn check_name(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!("{} must not be empty", field)));
    }
    check_len(field, value, max_len)
}

fn check_len(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.chars().count() > max_len {
        return Err(Error::invalid_input(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

fn check_optional_name(field: &str, value: Option<&str>, max_len: usize) -> Result<()> {
    match value {
        Some(v) => check_name(field, v, max_len),
        None => Ok(()),
    }
}

fn check_optional_len(field: &str, value: Option<&str>, max_len: usize) -> Result<()> {
    match value {
        Some(v) => check_len(field, v, max_len),
        None => Ok(()),
    }
}

/// The admin client submits `""` for cleared text inputs.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Optional record reference; `null`, `""` and `0` all mean "no reference",
/// numeric strings are accepted.
pub(crate) fn optional_reference<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reference {
        Id(i64),
        Text(String),
    }

    match Option::<Reference>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Reference::Id(0)) => Ok(None),
        Some(Reference::Id(id)) => Ok(Some(id)),
        Some(Reference::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Reference::Text(s)) => match s.trim().parse::<i64>() {
            Ok(0) => Ok(None),
            Ok(id) => Ok(Some(id)),
            Err(_) => Err(serde::de::Error::custom(format!(
                "invalid reference id '{}'",
                s
            ))),
        },
    }
}

/// `""` for an unset timestamp is treated as absent.
pub(crate) fn optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<chrono::DateTime<chrono::Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_timestamp(s).map(Some).map_err(serde::de::Error::custom),
    }
}

// Update inputs for nullable columns. A missing key leaves the column
// alone (`None`); a present key, including the cleared shapes above,
// overwrites it (`Some(..)`).

pub(crate) fn clearable_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_string_as_none(deserializer).map(Some)
}

pub(crate) fn clearable_reference<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_reference(deserializer).map(Some)
}

pub(crate) fn clearable_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<chrono::DateTime<chrono::Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_timestamp(deserializer).map(Some)
}

fn parse_timestamp(s: &str) -> std::result::Result<chrono::DateTime<chrono::Utc>, String> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    // datetime-local inputs omit the offset
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("invalid timestamp '{}'", s))
}
