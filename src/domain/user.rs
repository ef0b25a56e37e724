//! User Entity
//!
//! The stored profile for an authenticated user, including the denormalized
//! list of project ids kept in sync by the membership write path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A user row in the hosted `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identity-provider id
    pub id: String,
    pub username: String,
    pub email: String,
    pub image: Option<String>,
    pub role: String,
    #[serde(default)]
    pub org_id: Option<String>,
    /// Denormalized project membership, one id per joined project
    #[serde(rename = "project_id", default)]
    pub project_ids: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_member_of(&self, project_id: &str) -> bool {
        self.project_ids.iter().any(|p| p == project_id)
    }

    /// True when any profile field differs from `other` (the stored row)
    pub fn differs_from(&self, other: &User) -> bool {
        self.username != other.username
            || self.email != other.email
            || self.image != other.image
            || self.role != other.role
            || self.org_id != other.org_id
            || self.project_ids != other.project_ids
    }
}

impl Entity for User {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            image: None,
            role: "admin".into(),
            org_id: Some("org1".into()),
            project_ids: vec!["p1".into()],
            created_at: None,
        }
    }

    #[test]
    fn test_membership_check() {
        let u = user();
        assert!(u.is_member_of("p1"));
        assert!(!u.is_member_of("p2"));
    }

    #[test]
    fn test_project_list_keeps_stored_column_name() {
        let json = serde_json::to_string(&user()).unwrap();
        assert!(json.contains(r#""project_id":["p1"]"#));
    }

    #[test]
    fn test_differs_from_ignores_created_at() {
        let a = user();
        let mut b = user();
        b.created_at = Some(Utc::now());
        assert!(!a.differs_from(&b));
        b.role = "basic_member".into();
        assert!(a.differs_from(&b));
    }
}
