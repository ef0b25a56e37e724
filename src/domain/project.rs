//! Project Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A project row in the hosted `projects` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Project {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Input for creating a project. The id is normally left to the data
/// service to assign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            owner_id: owner_id.into(),
            created_at: Utc::now(),
        }
    }
}
