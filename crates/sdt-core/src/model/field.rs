use super::{
    NAME_MAX_LEN, check_name, check_optional_len, check_optional_name, clearable_reference,
    clearable_string, empty_string_as_none, optional_reference,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A column definition belonging to a table.
///
/// Fields of a table are ordered by ascending `table_wise_field_id`. The
/// foreign-key flag and reference ids are descriptive metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub table_wise_field_id: i64,
    pub table_id: i64,
    pub field_name: String,
    pub field_datatype_id: i64,
    pub is_primary: bool,
    pub field_label: Option<String>,
    pub display_name: Option<String>,
    pub is_auto_increment: bool,
    pub is_foreign_key: bool,
    pub reference_table_id: Option<i64>,
    pub reference_table_field_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewField {
    pub table_id: i64,
    pub field_name: String,
    pub field_datatype_id: i64,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub field_label: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_auto_increment: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default, deserialize_with = "optional_reference")]
    pub reference_table_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_reference")]
    pub reference_table_field_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldUpdate {
    #[serde(default)]
    pub table_id: Option<i64>,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub field_datatype_id: Option<i64>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default, deserialize_with = "clearable_string")]
    pub field_label: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable_string")]
    pub display_name: Option<Option<String>>,
    #[serde(default)]
    pub is_auto_increment: Option<bool>,
    #[serde(default)]
    pub is_foreign_key: Option<bool>,
    #[serde(default, deserialize_with = "clearable_reference")]
    pub reference_table_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "clearable_reference")]
    pub reference_table_field_id: Option<Option<i64>>,
}

impl NewField {
    pub fn validate(&self) -> Result<()> {
        check_name("field_name", &self.field_name, NAME_MAX_LEN)?;
        check_optional_len("field_label", self.field_label.as_deref(), NAME_MAX_LEN)?;
        check_optional_len("display_name", self.display_name.as_deref(), NAME_MAX_LEN)
    }
}

impl FieldUpdate {
    pub fn is_empty(&self) -> bool {
        self.table_id.is_none()
            && self.field_name.is_none()
            && self.field_datatype_id.is_none()
            && self.is_primary.is_none()
            && self.field_label.is_none()
            && self.display_name.is_none()
            && self.is_auto_increment.is_none()
            && self.is_foreign_key.is_none()
            && self.reference_table_id.is_none()
            && self.reference_table_field_id.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_name("field_name", self.field_name.as_deref(), NAME_MAX_LEN)?;
        check_optional_len(
            "field_label",
            self.field_label.as_ref().and_then(Option::as_deref),
            NAME_MAX_LEN,
        )?;
        check_optional_len(
            "display_name",
            self.display_name.as_ref().and_then(Option::as_deref),
            NAME_MAX_LEN,
        )
    }

    pub fn apply(self, field: &mut Field) {
        if let Some(table_id) = self.table_id {
            field.table_id = table_id;
        }
        if let Some(name) = self.field_name {
            field.field_name = name;
        }
        if let Some(datatype_id) = self.field_datatype_id {
            field.field_datatype_id = datatype_id;
        }
        if let Some(primary) = self.is_primary {
            field.is_primary = primary;
        }
        if let Some(label) = self.field_label {
            field.field_label = label;
        }
        if let Some(display_name) = self.display_name {
            field.display_name = display_name;
        }
        if let Some(auto_increment) = self.is_auto_increment {
            field.is_auto_increment = auto_increment;
        }
        if let Some(foreign_key) = self.is_foreign_key {
            field.is_foreign_key = foreign_key;
        }
        if let Some(reference) = self.reference_table_id {
            field.reference_table_id = reference;
        }
        if let Some(reference) = self.reference_table_field_id {
            field.reference_table_field_id = reference;
        }
    }
}
