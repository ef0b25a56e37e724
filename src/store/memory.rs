//! In-Memory Data Store
//!
//! Hash-map-backed `DataStore` for tests and local development. Failure
//! injection switches let tests exercise the fail-soft and compensating
//! paths without a network.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::traits::{DataStore, StoreError, StoreResult};
use crate::domain::{Entity, Member, NewProject, Project, User};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    projects: Vec<Project>,
    members: Vec<Member>,
    next_project: u64,
}

/// In-memory implementation of the data-store interface
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    failing_user_fetches: Mutex<HashSet<String>>,
    fail_user_updates: AtomicBool,
    fail_member_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user row
    pub fn put_user(&self, user: User) {
        let mut inner = self.inner.lock().expect("store lock");
        inner.users.insert(user.id.clone(), user);
    }

    /// Seed a member row
    pub fn put_member(&self, member: Member) {
        let mut inner = self.inner.lock().expect("store lock");
        inner.members.push(member);
    }

    /// Make `get_user` fail for one specific id
    pub fn fail_user_fetches_for(&self, id: &str) {
        self.failing_user_fetches
            .lock()
            .expect("store lock")
            .insert(id.to_string());
    }

    /// Make every `update_user` fail
    pub fn fail_user_updates(&self, fail: bool) {
        self.fail_user_updates.store(fail, Ordering::SeqCst);
    }

    /// Make every member write fail
    pub fn fail_member_writes(&self, fail: bool) {
        self.fail_member_writes.store(fail, Ordering::SeqCst);
    }

    pub fn member_count(&self, project_id: &str) -> usize {
        let inner = self.inner.lock().expect("store lock");
        inner
            .members
            .iter()
            .filter(|m| m.project_id == project_id)
            .count()
    }

    fn injected(&self, what: &str) -> StoreError {
        StoreError::Response {
            status: 500,
            body: format!("injected failure: {what}"),
        }
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.lock().expect("store lock");
        Ok(inner.users.values().cloned().collect())
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        if self
            .failing_user_fetches
            .lock()
            .expect("store lock")
            .contains(id)
        {
            return Err(self.injected("get_user"));
        }
        let inner = self.inner.lock().expect("store lock");
        Ok(inner.users.get(id).cloned())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn update_user(&self, user: &User) -> StoreResult<User> {
        if self.fail_user_updates.load(Ordering::SeqCst) {
            return Err(self.injected("update_user"));
        }
        let mut inner = self.inner.lock().expect("store lock");
        match inner.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user.clone())
            }
            None => Err(StoreError::Response {
                status: 404,
                body: format!("no user {}", user.id),
            }),
        }
    }

    async fn insert_project(&self, project: &NewProject) -> StoreResult<Project> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.next_project += 1;
        let id = project
            .id
            .clone()
            .unwrap_or_else(|| format!("proj-{}", inner.next_project));
        let created = Project {
            id,
            name: project.name.clone(),
            description: project.description.clone(),
            owner_id: project.owner_id.clone(),
            created_at: project.created_at,
        };
        inner.projects.push(created.clone());
        Ok(created)
    }

    async fn projects_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Project>> {
        let inner = self.inner.lock().expect("store lock");
        let mut projects: Vec<Project> = inner
            .projects
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn members_by_project(&self, project_id: &str) -> StoreResult<Vec<Member>> {
        let inner = self.inner.lock().expect("store lock");
        Ok(inner
            .members
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn upsert_member(&self, member: &Member) -> StoreResult<()> {
        if self.fail_member_writes.load(Ordering::SeqCst) {
            return Err(self.injected("upsert_member"));
        }
        let mut inner = self.inner.lock().expect("store lock");
        match inner.members.iter_mut().find(|m| m.id() == member.id()) {
            Some(existing) => *existing = member.clone(),
            None => inner.members.push(member.clone()),
        }
        Ok(())
    }

    async fn delete_member(&self, user_id: &str, project_id: &str) -> StoreResult<()> {
        if self.fail_member_writes.load(Ordering::SeqCst) {
            return Err(self.injected("delete_member"));
        }
        let mut inner = self.inner.lock().expect("store lock");
        inner
            .members
            .retain(|m| !(m.user_id == user_id && m.project_id == project_id));
        Ok(())
    }
}
