//! Membership Service
//!
//! The project's member list: a three-fetch join for display, the
//! add-member write path, and directory search.
//!
//! Adding a member walks `writing-member-row → updating-user-profile →
//! reloading`. The two writes hit independent tables with no transaction,
//! so a failed profile update triggers a compensating member delete before
//! the error is reported; the stored membership and the user's
//! denormalized project list stay consistent either way.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::{DomainError, DomainResult, Member, MemberDetails, User};
use crate::identity::{AuthContext, DirectoryEntry};
use crate::store::DataStore;

/// Result of an add-member operation
#[derive(Debug, Clone, PartialEq)]
pub enum AddMemberOutcome {
    /// The member row was written; carries the reloaded member list
    Added(Vec<MemberDetails>),
    /// The user was already a member; nothing was written
    AlreadyMember,
}

pub struct MembershipService {
    store: Arc<dyn DataStore>,
}

impl MembershipService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// The display-ready member list for a project.
    ///
    /// Fetches the member rows, then one profile per distinct member id and
    /// per distinct adder id, and joins them. Fail-soft throughout: a
    /// member-fetch error yields an empty list, and a single failed profile
    /// fetch just leaves that entry's name blank.
    pub async fn load_members(&self, project_id: &str) -> Vec<MemberDetails> {
        let members = match self.store.members_by_project(project_id).await {
            Ok(members) => members,
            Err(e) => {
                log::error!("error fetching members of {project_id}: {e}");
                return Vec::new();
            }
        };
        if members.is_empty() {
            return Vec::new();
        }

        let profiles = self.fetch_profiles(&members).await;
        members
            .into_iter()
            .map(|member| {
                let user = profiles.get(&member.user_id);
                let adder = profiles.get(&member.added_by);
                MemberDetails {
                    username: user.map(|u| u.username.clone()),
                    image: user.and_then(|u| u.image.clone()),
                    added_by_username: adder.map(|u| u.username.clone()),
                    user_id: member.user_id,
                    added_by: member.added_by,
                    added_at: member.added_at,
                }
            })
            .collect()
    }

    /// Add a user to a project on behalf of `ctx`.
    ///
    /// Idempotent: a user already in the member list short-circuits without
    /// writing. Otherwise the member row is upserted, the target user's
    /// `org_id`/project list is brought in line, and the member list is
    /// reloaded. Any profile-side failure deletes the member row again.
    pub async fn add_member(
        &self,
        ctx: &AuthContext,
        project_id: &str,
        user_id: &str,
    ) -> DomainResult<AddMemberOutcome> {
        let org = ctx
            .org
            .as_ref()
            .ok_or_else(|| DomainError::InvalidInput("no organization context".to_string()))?;

        let current = self
            .store
            .members_by_project(project_id)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        if current.iter().any(|m| m.user_id == user_id) {
            return Ok(AddMemberOutcome::AlreadyMember);
        }

        log::debug!("add_member {user_id} -> {project_id}: writing member row");
        let member = Member {
            user_id: user_id.to_string(),
            project_id: project_id.to_string(),
            org_id: org.id.clone(),
            added_at: Utc::now(),
            added_by: ctx.user_id.clone(),
        };
        self.store.upsert_member(&member).await.map_err(|e| {
            log::error!("error adding member to project: {e}");
            DomainError::Store(e.to_string())
        })?;

        log::debug!("add_member {user_id} -> {project_id}: updating user profile");
        if let Err(e) = self.sync_member_profile(&member, &org.id).await {
            self.compensate(&member).await;
            return Err(e);
        }

        log::debug!("add_member {user_id} -> {project_id}: reloading");
        Ok(AddMemberOutcome::Added(self.load_members(project_id).await))
    }

    /// Case-insensitive substring search over first/last names in the
    /// organization directory, excluding the caller. An empty term resets
    /// to the full directory.
    pub fn search_members(&self, ctx: &AuthContext, term: &str) -> Vec<DirectoryEntry> {
        let Some(org) = ctx.org.as_ref() else {
            return Vec::new();
        };
        let term = term.trim().to_lowercase();
        org.members
            .iter()
            .filter(|entry| entry.user_id != ctx.user_id)
            .filter(|entry| {
                term.is_empty()
                    || entry.first_name.trim().to_lowercase().contains(term.as_str())
                    || entry.last_name.trim().to_lowercase().contains(term.as_str())
            })
            .cloned()
            .collect()
    }

    /// One profile fetch per distinct member or adder id
    async fn fetch_profiles(&self, members: &[Member]) -> HashMap<String, User> {
        let mut wanted: Vec<&str> = Vec::new();
        for member in members {
            for id in [member.user_id.as_str(), member.added_by.as_str()] {
                if !wanted.contains(&id) {
                    wanted.push(id);
                }
            }
        }

        let mut profiles = HashMap::new();
        for id in wanted {
            match self.store.get_user(id).await {
                Ok(Some(user)) => {
                    profiles.insert(id.to_string(), user);
                }
                Ok(None) => {}
                Err(e) => log::error!("error fetching user {id}: {e}"),
            }
        }
        profiles
    }

    /// Bring the added user's `org_id` and project list in line with the
    /// member row just written. A user with no stored profile is left
    /// alone; there is no list to keep consistent.
    async fn sync_member_profile(&self, member: &Member, org_id: &str) -> DomainResult<()> {
        let user = self
            .store
            .get_user(&member.user_id)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let Some(user) = user else {
            log::warn!("member {} has no stored profile", member.user_id);
            return Ok(());
        };

        let org_matches = user.org_id.as_deref() == Some(org_id);
        if org_matches && user.is_member_of(&member.project_id) {
            return Ok(());
        }

        let mut updated = user;
        updated.org_id = Some(org_id.to_string());
        if !updated.is_member_of(&member.project_id) {
            updated.project_ids.push(member.project_id.clone());
        }
        self.store
            .update_user(&updated)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(())
    }

    /// Undo the member write after a profile-side failure. A failed
    /// compensation leaves a residual row and is loudly logged; it is never
    /// reported as success.
    async fn compensate(&self, member: &Member) {
        match self
            .store
            .delete_member(&member.user_id, &member.project_id)
            .await
        {
            Ok(()) => log::warn!(
                "rolled back member row {} -> {}",
                member.user_id,
                member.project_id
            ),
            Err(e) => log::error!(
                "failed to roll back member row {} -> {}: {e}",
                member.user_id,
                member.project_id
            ),
        }
    }
}
