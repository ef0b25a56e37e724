//! Identity Context
//!
//! Read-only snapshot supplied by the identity provider: the authenticated
//! user plus their organization's member directory. This core never writes
//! back to the provider.

use serde::{Deserialize, Serialize};

use crate::domain::User;

/// One entry in the organization's member directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
}

/// The authenticated user's organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgContext {
    pub id: String,
    /// Directory of everyone in the organization
    pub members: Vec<DirectoryEntry>,
}

/// The authenticated user, as supplied by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub image: Option<String>,
    pub role: String,
    pub org: Option<OrgContext>,
}

impl AuthContext {
    /// The stored-profile shape of this identity, used when the user signs
    /// in for the first time. Project membership starts empty; the write
    /// path maintains it afterwards.
    pub fn as_new_user(&self) -> User {
        User {
            id: self.user_id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            role: self.role.clone(),
            org_id: self.org.as_ref().map(|o| o.id.clone()),
            project_ids: Vec::new(),
            created_at: Some(chrono::Utc::now()),
        }
    }

    /// `stored` with this identity's profile fields applied on top.
    /// Membership fields stay whatever the store says.
    pub fn apply_profile(&self, stored: &User) -> User {
        User {
            username: self.username.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            role: self.role.clone(),
            ..stored.clone()
        }
    }
}
