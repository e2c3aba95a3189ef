use super::{
    NAME_MAX_LEN, check_name, check_optional_name, clearable_string, empty_string_as_none,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: i64,
    pub project_name: String,
    pub project_description: Option<String>,
    /// Engine the project's datatypes come from
    pub database_id: i64,
    pub database_path: Option<String>,
    pub project_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub project_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub project_description: Option<String>,
    pub database_id: i64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub database_path: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub project_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "clearable_string")]
    pub project_description: Option<Option<String>>,
    #[serde(default)]
    pub database_id: Option<i64>,
    #[serde(default, deserialize_with = "clearable_string")]
    pub database_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable_string")]
    pub project_path: Option<Option<String>>,
}

impl NewProject {
    pub fn validate(&self) -> Result<()> {
        check_name("project_name", &self.project_name, NAME_MAX_LEN)
    }
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.project_name.is_none()
            && self.project_description.is_none()
            && self.database_id.is_none()
            && self.database_path.is_none()
            && self.project_path.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_name("project_name", self.project_name.as_deref(), NAME_MAX_LEN)
    }

    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.project_name {
            project.project_name = name;
        }
        if let Some(description) = self.project_description {
            project.project_description = description;
        }
        if let Some(database_id) = self.database_id {
            project.database_id = database_id;
        }
        if let Some(path) = self.database_path {
            project.database_path = path;
        }
        if let Some(path) = self.project_path {
            project.project_path = path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut project = Project {
            project_id: 1,
            project_name: "shop".to_string(),
            project_description: Some("storefront".to_string()),
            database_id: 2,
            database_path: None,
            project_path: Some("/srv/shop".to_string()),
        };

        let update: ProjectUpdate =
            serde_json::from_str(r#"{"project_name": "shop-v2"}"#).unwrap();
        assert!(!update.is_empty());
        update.apply(&mut project);

        assert_eq!(project.project_name, "shop-v2");
        assert_eq!(project.project_description.as_deref(), Some("storefront"));
        assert_eq!(project.database_id, 2);
        assert_eq!(project.project_path.as_deref(), Some("/srv/shop"));
    }

    #[test]
    fn test_empty_update_detected() {
        let update: ProjectUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_clears_optional_text() {
        let mut project = Project {
            project_id: 1,
            project_name: "shop".to_string(),
            project_description: Some("storefront".to_string()),
            database_id: 2,
            database_path: Some("/var/lib/pg".to_string()),
            project_path: Some("/srv/shop".to_string()),
        };

        let update: ProjectUpdate =
            serde_json::from_str(r#"{"project_description": "", "project_path": null}"#).unwrap();
        update.apply(&mut project);

        assert_eq!(project.project_description, None);
        assert_eq!(project.project_path, None);
        assert_eq!(project.database_path.as_deref(), Some("/var/lib/pg"));
    }
}
