use super::{
    NAME_MAX_LEN, check_name, check_optional_name, clearable_string, clearable_timestamp,
    empty_string_as_none, optional_timestamp,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A table designed inside a project. `table_name` is emitted verbatim as the
/// SQL identifier by the DDL generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub table_id: i64,
    pub project_id: i64,
    pub table_name: String,
    pub table_description: Option<String>,
    pub is_generated: bool,
    pub generated_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTable {
    pub project_id: i64,
    pub table_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub table_description: Option<String>,
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub generated_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableUpdate {
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default, deserialize_with = "clearable_string")]
    pub table_description: Option<Option<String>>,
    #[serde(default)]
    pub is_generated: Option<bool>,
    #[serde(default, deserialize_with = "clearable_timestamp")]
    pub generated_date: Option<Option<DateTime<Utc>>>,
}

impl NewTable {
    pub fn validate(&self) -> Result<()> {
        check_name("table_name", &self.table_name, NAME_MAX_LEN)
    }
}

impl TableUpdate {
    pub fn is_empty(&self) -> bool {
        self.table_name.is_none()
            && self.table_description.is_none()
            && self.is_generated.is_none()
            && self.generated_date.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_name("table_name", self.table_name.as_deref(), NAME_MAX_LEN)
    }

    pub fn apply(self, table: &mut Table) {
        if let Some(name) = self.table_name {
            table.table_name = name;
        }
        if let Some(description) = self.table_description {
            table.table_description = description;
        }
        if let Some(generated) = self.is_generated {
            table.is_generated = generated;
        }
        if let Some(date) = self.generated_date {
            table.generated_date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_from_client_body() {
        let table: NewTable = serde_json::from_str(
            r#"{"project_id": 3, "table_name": "users", "table_description": "", "generated_date": ""}"#,
        )
        .unwrap();

        assert_eq!(table.project_id, 3);
        assert!(table.table_description.is_none());
        assert!(!table.is_generated);
        assert!(table.generated_date.is_none());
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_blank_table_name_rejected() {
        let table = NewTable {
            project_id: 1,
            table_name: " ".to_string(),
            table_description: None,
            is_generated: false,
            generated_date: None,
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_update_clears_description_and_date() {
        let mut table = Table {
            table_id: 1,
            project_id: 3,
            table_name: "users".to_string(),
            table_description: Some("registered users".to_string()),
            is_generated: true,
            generated_date: "2024-03-01T12:00:00Z".parse().ok(),
        };

        let update: TableUpdate =
            serde_json::from_str(r#"{"table_description": "", "generated_date": ""}"#).unwrap();
        assert!(!update.is_empty());
        update.apply(&mut table);

        assert_eq!(table.table_description, None);
        assert_eq!(table.generated_date, None);
        assert!(table.is_generated);

        let update: TableUpdate = serde_json::from_str(r#"{"is_generated": false}"#).unwrap();
        update.apply(&mut table);
        assert_eq!(table.table_name, "users");
        assert_eq!(table.table_description, None);
    }
}
