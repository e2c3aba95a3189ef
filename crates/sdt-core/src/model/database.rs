use super::{NAME_MAX_LEN, check_name, check_optional_name};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A target database engine/variant (e.g. "PostgreSQL") that projects and
/// datatypes are scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub database_id: i64,
    pub database_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDatabase {
    pub database_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseUpdate {
    #[serde(default)]
    pub database_name: Option<String>,
}

impl NewDatabase {
    pub fn validate(&self) -> Result<()> {
        check_name("database_name", &self.database_name, NAME_MAX_LEN)
    }
}

impl DatabaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.database_name.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_name("database_name", self.database_name.as_deref(), NAME_MAX_LEN)
    }

    pub fn apply(self, database: &mut Database) {
        if let Some(name) = self.database_name {
            database.database_name = name;
        }
    }
}
