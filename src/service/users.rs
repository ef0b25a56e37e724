//! User Service
//!
//! Keeps stored user profiles in line with the identity provider. All
//! reads are fail-soft: a store error is logged and reported as absence,
//! matching how callers treat "not found".

use std::sync::Arc;

use crate::domain::User;
use crate::identity::AuthContext;
use crate::store::DataStore;

pub struct UserService {
    store: Arc<dyn DataStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// A user by id, or `None` on a miss or a store error
    pub async fn get_user(&self, id: &str) -> Option<User> {
        match self.store.get_user(id).await {
            Ok(user) => user,
            Err(e) => {
                log::error!("error fetching user {id}: {e}");
                None
            }
        }
    }

    /// Every stored user, or empty on a store error
    pub async fn list_users(&self) -> Vec<User> {
        match self.store.list_users().await {
            Ok(users) => users,
            Err(e) => {
                log::error!("error fetching users: {e}");
                Vec::new()
            }
        }
    }

    /// Insert the signed-in identity if no row exists yet, otherwise bring
    /// the stored profile up to date. Returns the stored row either way.
    pub async fn sync_user(&self, ctx: &AuthContext) -> Option<User> {
        match self.get_user(&ctx.user_id).await {
            None => {
                let user = ctx.as_new_user();
                match self.store.insert_user(&user).await {
                    Ok(created) => Some(created),
                    Err(e) => {
                        log::error!("error adding user {}: {e}", ctx.user_id);
                        None
                    }
                }
            }
            Some(existing) => {
                let updated = ctx.apply_profile(&existing);
                self.update_user_if_changed(&existing, updated).await
            }
        }
    }

    /// Write `updated` over `existing` when any field differs, then re-read
    /// the stored row. An unchanged profile skips the write entirely.
    pub async fn update_user_if_changed(&self, existing: &User, updated: User) -> Option<User> {
        if !updated.differs_from(existing) {
            return Some(existing.clone());
        }
        if let Err(e) = self.store.update_user(&updated).await {
            log::error!("error updating user {}: {e}", updated.id);
            return None;
        }
        self.get_user(&updated.id).await
    }
}
