//! Member Entity
//!
//! The association of a user to a project, with audit fields for who added
//! them and when. Display records denormalize usernames and avatars pulled
//! from the `users` table at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A member row in the hosted `members` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: String,
    pub project_id: String,
    pub org_id: String,
    pub added_at: DateTime<Utc>,
    pub added_by: String,
}

impl Entity for Member {
    /// Members are keyed by the (user, project) pair
    type Id = (String, String);

    fn id(&self) -> Self::Id {
        (self.user_id.clone(), self.project_id.clone())
    }
}

/// A member row joined with the profiles of the member and their adder.
/// Profile fields stay empty when the corresponding fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDetails {
    pub user_id: String,
    pub username: Option<String>,
    pub image: Option<String>,
    pub added_by: String,
    pub added_by_username: Option<String>,
    pub added_at: DateTime<Utc>,
}
