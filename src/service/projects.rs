//! Project Service
//!
//! Project creation and the dashboard's project listing. The listing
//! resolves the user's denormalized project-id list and then pulls the
//! matching rows, newest first.

use std::sync::Arc;

use crate::domain::{NewProject, Project, User};
use crate::store::DataStore;

pub struct ProjectService {
    store: Arc<dyn DataStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Insert a project and return the created row
    pub async fn create_project(&self, project: NewProject) -> Option<Project> {
        match self.store.insert_project(&project).await {
            Ok(created) => Some(created),
            Err(e) => {
                log::error!("error creating project: {e}");
                None
            }
        }
    }

    /// The projects a user belongs to, ordered by creation time descending.
    /// Users with no list, and any store error, yield an empty result.
    pub async fn fetch_projects(&self, user_id: &str) -> Vec<Project> {
        let user = match self.store.get_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::warn!("no projects found for user {user_id}");
                return Vec::new();
            }
            Err(e) => {
                log::error!("error fetching user {user_id}: {e}");
                return Vec::new();
            }
        };
        if user.project_ids.is_empty() {
            log::warn!("no projects found for user {user_id}");
            return Vec::new();
        }
        match self.store.projects_by_ids(&user.project_ids).await {
            Ok(projects) => projects,
            Err(e) => {
                log::error!("error fetching projects: {e}");
                Vec::new()
            }
        }
    }

    /// The dashboard's add-project flow: create the project, stitch its id
    /// into the owner's list, and return the refreshed listing. A failed
    /// stitch leaves the created row in place and reports nothing, like
    /// every other partial failure here.
    pub async fn create_owned_project(&self, project: NewProject) -> Option<Vec<Project>> {
        let owner_id = project.owner_id.clone();
        let created = self.create_project(project).await?;
        if self
            .update_user_projects(&owner_id, &created.id)
            .await
            .is_none()
        {
            log::error!("failed to update user {owner_id} with new project id");
            return None;
        }
        Some(self.fetch_projects(&owner_id).await)
    }

    /// Append a project id to a user's list, skipping ids already present,
    /// and return the re-read row
    pub async fn update_user_projects(&self, user_id: &str, project_id: &str) -> Option<User> {
        let user = match self.store.get_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::error!("error updating user {user_id}: no such user");
                return None;
            }
            Err(e) => {
                log::error!("error fetching user {user_id}: {e}");
                return None;
            }
        };
        if user.is_member_of(project_id) {
            return Some(user);
        }
        let mut updated = user;
        updated.project_ids.push(project_id.to_string());
        if let Err(e) = self.store.update_user(&updated).await {
            log::error!("error updating user {user_id} projects: {e}");
            return None;
        }
        match self.store.get_user(user_id).await {
            Ok(user) => user,
            Err(e) => {
                log::error!("error fetching user {user_id}: {e}");
                None
            }
        }
    }
}
