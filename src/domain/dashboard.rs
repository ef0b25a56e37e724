//! Retro Board Directory
//!
//! The dashboard's list of retro boards. Boards are named on creation and
//! link out to their own route.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::IdAllocator;

/// A retro board as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroBoard {
    pub id: u64,
    pub name: String,
}

/// Ordered list of the retro boards a project has created
#[derive(Debug)]
pub struct BoardDirectory {
    boards: Vec<RetroBoard>,
    ids: Arc<IdAllocator>,
}

impl BoardDirectory {
    pub fn new(ids: Arc<IdAllocator>) -> Self {
        Self {
            boards: Vec::new(),
            ids,
        }
    }

    pub fn boards(&self) -> &[RetroBoard] {
        &self.boards
    }

    /// Append a board named after its position in the list
    pub fn add_board(&mut self) -> u64 {
        let id = self.ids.next_id();
        let name = format!("Retro Board {}", self.boards.len() + 1);
        self.boards.push(RetroBoard { id, name });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boards_are_numbered_in_order() {
        let mut directory = BoardDirectory::new(Arc::new(IdAllocator::starting_at(10)));
        directory.add_board();
        directory.add_board();
        let names: Vec<&str> = directory.boards().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Retro Board 1", "Retro Board 2"]);
    }

    #[test]
    fn test_board_ids_are_unique() {
        let mut directory = BoardDirectory::new(Arc::new(IdAllocator::starting_at(10)));
        let a = directory.add_board();
        let b = directory.add_board();
        assert_ne!(a, b);
    }
}
