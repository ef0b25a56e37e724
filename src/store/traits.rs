//! Store Layer - Core Traits
//!
//! Abstract interface over the hosted relational data service. The REST
//! implementation talks to the real service; the in-memory one backs tests
//! and local development.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Member, NewProject, Project, User};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by data-store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status
    #[error("service responded {status}: {body}")]
    Response { status: u16, body: String },
    /// The response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),
}

/// Point queries over the hosted `users`, `projects` and `members` tables.
///
/// Every operation is a single query; no transactions span related writes.
/// Callers that need multi-step consistency compensate explicitly
/// (see the membership service).
#[async_trait]
pub trait DataStore: Send + Sync {
    /// All user rows
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// A single user by id; `None` when no row matches
    async fn get_user(&self, id: &str) -> StoreResult<Option<User>>;

    /// Insert a user row and return it
    async fn insert_user(&self, user: &User) -> StoreResult<User>;

    /// Update an existing user row by id and return the stored row
    async fn update_user(&self, user: &User) -> StoreResult<User>;

    /// Insert a project and return the created row (with its assigned id)
    async fn insert_project(&self, project: &NewProject) -> StoreResult<Project>;

    /// Projects matching an id list, newest first
    async fn projects_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Project>>;

    /// All member rows for a project
    async fn members_by_project(&self, project_id: &str) -> StoreResult<Vec<Member>>;

    /// Insert-or-replace a member row keyed by (user, project)
    async fn upsert_member(&self, member: &Member) -> StoreResult<()>;

    /// Remove a member row; the compensating step of the add-member path
    async fn delete_member(&self, user_id: &str, project_id: &str) -> StoreResult<()>;
}
