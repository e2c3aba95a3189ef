use serde::{Deserialize, Deserializer, Serialize};

/// `?project_id=` on `/api/tables`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub project_id: Option<i64>,
}

/// `?table_id=` on `/api/fields`, `/api/gettablename` and `/api/generate-sql`
#[derive(Debug, Clone, Deserialize)]
pub struct TableFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub table_id: Option<i64>,
}

/// `?database_id=` on `/api/datatype`; absent lists every engine
#[derive(Debug, Clone, Deserialize)]
pub struct DatatypeFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub database_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableNameResponse {
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSqlResponse {
    pub query: String,
}

/// Query strings carry every value as text; `?x=` counts as absent.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer `{}`", raw))),
    }
}
