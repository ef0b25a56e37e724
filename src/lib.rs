//! Retroboard Core
//!
//! Team-collaboration core: users join projects and collaborate on
//! retrospective boards with draggable sticky notes.
//!
//! Layered architecture:
//! - domain: Entities and the pure state containers
//! - store: Data access abstractions and implementations
//! - service: Operations composing store calls
//! - presence: Live cursor sharing
//! - routes: Path parsing and the auth guard

pub mod config;
pub mod domain;
pub mod identity;
pub mod ids;
pub mod presence;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use config::AppConfig;
use domain::{Board, BoardDirectory};
use ids::IdAllocator;
use presence::{room_for_project, PresenceHub, RoomConnection};
use service::{MembershipService, ProjectService, UserService};
use store::{DataStore, RestDataStore};

/// Application state shared across handlers.
///
/// The data store and presence hub are created once and injected
/// everywhere; swapping the store for the in-memory one turns the whole
/// app into a self-contained test subject.
pub struct App {
    pub store: Arc<dyn DataStore>,
    pub presence: PresenceHub,
    pub ids: Arc<IdAllocator>,
    pub users: UserService,
    pub projects: ProjectService,
    pub membership: MembershipService,
}

impl App {
    /// Wire the app against the hosted data service
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(Arc::new(RestDataStore::new(config)))
    }

    /// Wire the app against any data store implementation
    pub fn with_store(store: Arc<dyn DataStore>) -> Self {
        Self {
            users: UserService::new(store.clone()),
            projects: ProjectService::new(store.clone()),
            membership: MembershipService::new(store.clone()),
            presence: PresenceHub::new(),
            ids: Arc::new(IdAllocator::new()),
            store,
        }
    }

    /// A fresh retro board with the three standard columns
    pub fn new_board(&self) -> Board {
        Board::with_default_columns(self.ids.clone())
    }

    /// An empty dashboard board list
    pub fn new_board_directory(&self) -> BoardDirectory {
        BoardDirectory::new(self.ids.clone())
    }

    /// Join the presence room backing a project's retro board
    pub fn join_board_room(&self, project_id: &str) -> RoomConnection {
        self.presence.join(&room_for_project(project_id))
    }
}
