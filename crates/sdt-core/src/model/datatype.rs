use super::{DATATYPE_NAME_MAX_LEN, check_name, check_optional_name};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Maps an id to a UI label and the SQL type keyword written into DDL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datatype {
    pub field_datatype_id: i64,
    /// Engine this datatype belongs to
    #[serde(rename = "database_table_id")]
    pub database_id: i64,
    pub display_name: String,
    #[serde(rename = "datatype_name")]
    pub sql_type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDatatype {
    #[serde(rename = "database_table_id")]
    pub database_id: i64,
    pub display_name: String,
    #[serde(rename = "datatype_name")]
    pub sql_type_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatatypeUpdate {
    #[serde(default, rename = "database_table_id")]
    pub database_id: Option<i64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "datatype_name")]
    pub sql_type_name: Option<String>,
}

impl NewDatatype {
    pub fn validate(&self) -> Result<()> {
        check_name("display_name", &self.display_name, DATATYPE_NAME_MAX_LEN)?;
        check_name("datatype_name", &self.sql_type_name, DATATYPE_NAME_MAX_LEN)
    }
}

impl DatatypeUpdate {
    pub fn is_empty(&self) -> bool {
        self.database_id.is_none() && self.display_name.is_none() && self.sql_type_name.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_name(
            "display_name",
            self.display_name.as_deref(),
            DATATYPE_NAME_MAX_LEN,
        )?;
        check_optional_name(
            "datatype_name",
            self.sql_type_name.as_deref(),
            DATATYPE_NAME_MAX_LEN,
        )
    }

    pub fn apply(self, datatype: &mut Datatype) {
        if let Some(database_id) = self.database_id {
            datatype.database_id = database_id;
        }
        if let Some(display_name) = self.display_name {
            datatype.display_name = display_name;
        }
        if let Some(sql_type_name) = self.sql_type_name {
            datatype.sql_type_name = sql_type_name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let datatype = Datatype {
            field_datatype_id: 1,
            database_id: 2,
            display_name: "Integer".to_string(),
            sql_type_name: "INTEGER".to_string(),
        };

        let json = serde_json::to_value(&datatype).unwrap();
        assert_eq!(json["database_table_id"], 2);
        assert_eq!(json["datatype_name"], "INTEGER");
    }
}
